// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/category.rs - 废弃物类别与静态元数据
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

/// 废弃物类别。`ALL` 的顺序即评分与并列时的优先顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasteCategory {
  Paper,
  Plastic,
  Glass,
  Metal,
  Food,
  Yard,
  Hazardous,
  EWaste,
  Landfill,
}

impl WasteCategory {
  pub const ALL: [WasteCategory; 9] = [
    WasteCategory::Paper,
    WasteCategory::Plastic,
    WasteCategory::Glass,
    WasteCategory::Metal,
    WasteCategory::Food,
    WasteCategory::Yard,
    WasteCategory::Hazardous,
    WasteCategory::EWaste,
    WasteCategory::Landfill,
  ];

  pub fn id(self) -> &'static str {
    self.profile().id
  }

  pub fn profile(self) -> &'static CategoryProfile {
    &CATEGORY_PROFILES[self as usize]
  }

  /// 类别专属小贴士。部分类别没有专属条目。
  pub fn tips(self) -> &'static [&'static str] {
    match self {
      WasteCategory::Paper => &PAPER_TIPS,
      WasteCategory::Plastic => &PLASTIC_TIPS,
      WasteCategory::Glass => &GLASS_TIPS,
      WasteCategory::Metal => &METAL_TIPS,
      WasteCategory::Food => &FOOD_TIPS,
      WasteCategory::Hazardous => &HAZARDOUS_TIPS,
      WasteCategory::Yard | WasteCategory::EWaste | WasteCategory::Landfill => &[],
    }
  }
}

/// 类别的静态描述信息，随分类结果一起输出。
#[derive(Debug)]
pub struct CategoryProfile {
  pub id: &'static str,
  pub name: &'static str,
  pub subcategories: &'static [&'static str],
  pub disposal_instructions: &'static str,
  pub recycling_code: &'static str,
  pub contamination_warnings: &'static [&'static str],
}

static CATEGORY_PROFILES: [CategoryProfile; 9] = [
  CategoryProfile {
    id: "recyclable_paper",
    name: "Paper & Cardboard",
    subcategories: &[
      "newspaper",
      "cardboard",
      "office_paper",
      "magazines",
      "paper_bags",
    ],
    disposal_instructions: "Keep dry and clean, flatten boxes",
    recycling_code: "PAP",
    contamination_warnings: &["no_greasy_pizza_boxes", "no_waxed_paper"],
  },
  CategoryProfile {
    id: "recyclable_plastic",
    name: "Plastic Containers",
    subcategories: &[
      "pet_bottles",
      "hdpe_containers",
      "plastic_bottles",
      "plastic_containers",
    ],
    disposal_instructions: "Rinse thoroughly, remove caps",
    recycling_code: "PLA",
    contamination_warnings: &["no_plastic_bags", "no_styrofoam"],
  },
  CategoryProfile {
    id: "recyclable_glass",
    name: "Glass Containers",
    subcategories: &["clear_glass", "brown_glass", "green_glass", "glass_bottles"],
    disposal_instructions: "Rinse and separate by color",
    recycling_code: "GL",
    contamination_warnings: &["no_ceramics", "no_lightbulbs"],
  },
  CategoryProfile {
    id: "recyclable_metal",
    name: "Metal Containers",
    subcategories: &["aluminum_cans", "steel_cans", "metal_lids", "foil"],
    disposal_instructions: "Rinse and flatten if possible",
    recycling_code: "MET",
    contamination_warnings: &["no_electronics", "no_batteries"],
  },
  CategoryProfile {
    id: "organic_food",
    name: "Food Waste",
    subcategories: &[
      "fruits",
      "vegetables",
      "leftovers",
      "coffee_grounds",
      "egg_shells",
    ],
    disposal_instructions: "Compost in designated bin",
    recycling_code: "ORG",
    contamination_warnings: &["no_meat", "no_dairy"],
  },
  CategoryProfile {
    id: "organic_yard",
    name: "Yard Waste",
    subcategories: &["leaves", "grass", "branches", "flowers", "plants"],
    disposal_instructions: "Use yard waste bin or compost",
    recycling_code: "YRD",
    contamination_warnings: &["no_soil", "no_rocks"],
  },
  CategoryProfile {
    id: "hazardous",
    name: "Hazardous Materials",
    subcategories: &["batteries", "electronics", "chemicals", "paints"],
    disposal_instructions: "Take to hazardous waste facility",
    recycling_code: "HAZ",
    contamination_warnings: &["do_not_mix_with_regular_trash"],
  },
  CategoryProfile {
    id: "e_waste",
    name: "Electronic Waste",
    subcategories: &["phones", "laptops", "cables", "batteries"],
    disposal_instructions: "Recycle at e-waste center",
    recycling_code: "EW",
    contamination_warnings: &["contains_toxic_materials"],
  },
  CategoryProfile {
    id: "landfill_general",
    name: "General Waste",
    subcategories: &["mixed_materials", "soiled_items", "disposable_items"],
    disposal_instructions: "Place in landfill bin",
    recycling_code: "LND",
    contamination_warnings: &["try_to_reduce_usage"],
  },
];

static PAPER_TIPS: [&str; 4] = [
  "Flatten cardboard boxes to save 80% space in recycling bins",
  "Remove plastic windows from envelopes before recycling",
  "Shredded paper should be bagged to prevent mess",
  "Greasy pizza boxes go in compost, not recycling",
];

static PLASTIC_TIPS: [&str; 4] = [
  "Check resin codes - only #1 (PET) and #2 (HDPE) are widely recyclable",
  "Remove pump dispensers from bottles - they're different plastic",
  "Plastic film and bags require special drop-off recycling",
  "Black plastic is rarely recyclable due to sorting issues",
];

static GLASS_TIPS: [&str; 4] = [
  "Glass can be recycled infinitely without quality loss",
  "Separate by color for higher quality recycling",
  "Remove metal lids and corks before recycling",
  "Broken glass should be wrapped and marked for safety",
];

static METAL_TIPS: [&str; 4] = [
  "Aluminum cans are 100% recyclable and save 95% energy",
  "Clean foil can be recycled if balled up to golf-ball size",
  "Aerosol cans are recyclable if completely empty",
  "Scrap metal has high recycling value",
];

static FOOD_TIPS: [&str; 4] = [
  "Composting reduces landfill methane by 90%",
  "Use airtight containers to prevent odors and pests",
  "Balance greens (food) with browns (paper, leaves)",
  "Vermicomposting works great for apartments",
];

static HAZARDOUS_TIPS: [&str; 4] = [
  "One battery can contaminate 30,000 liters of water",
  "Many retailers offer free battery recycling",
  "Never incinerate hazardous materials",
  "Check local household hazardous waste collection days",
];

pub const LOW_CONFIDENCE_TIP: &str =
  "Consider taking another photo with better lighting for more accurate classification";

pub static GENERAL_TIPS: [&str; 4] = [
  "Always check local recycling guidelines as they vary by municipality",
  "When in doubt, throw it out to prevent recycling contamination",
  "Reduce consumption first, then reuse, then recycle",
  "Clean and dry materials improve recycling efficiency",
];

/// 组合最终的小贴士列表：类别专属条目，低置信度提示，以及前两条通用建议。
pub fn eco_tips(category: WasteCategory, confidence: f32) -> Vec<&'static str> {
  let mut tips: Vec<&'static str> = category.tips().to_vec();
  if confidence < 0.7 {
    tips.push(LOW_CONFIDENCE_TIP);
  }
  tips.extend_from_slice(&GENERAL_TIPS[..2]);
  tips
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn profiles_match_category_order() {
    for (index, category) in WasteCategory::ALL.iter().enumerate() {
      assert_eq!(category.profile().id, CATEGORY_PROFILES[index].id);
    }
    assert_eq!(WasteCategory::Paper.id(), "recyclable_paper");
    assert_eq!(WasteCategory::EWaste.id(), "e_waste");
    assert_eq!(WasteCategory::Landfill.id(), "landfill_general");
  }

  #[test]
  fn tips_for_confident_paper() {
    let tips = eco_tips(WasteCategory::Paper, 0.9);
    assert_eq!(tips.len(), 6);
    assert_eq!(tips[0], PAPER_TIPS[0]);
    assert_eq!(tips[4], GENERAL_TIPS[0]);
    assert_eq!(tips[5], GENERAL_TIPS[1]);
    assert!(!tips.contains(&LOW_CONFIDENCE_TIP));
  }

  #[test]
  fn low_confidence_adds_advisory() {
    let tips = eco_tips(WasteCategory::Yard, 0.5);
    assert_eq!(tips.len(), 3);
    assert_eq!(tips[0], LOW_CONFIDENCE_TIP);
  }

  #[test]
  fn landfill_only_gets_general_tips() {
    let tips = eco_tips(WasteCategory::Landfill, 0.95);
    assert_eq!(tips, &GENERAL_TIPS[..2]);
  }
}
