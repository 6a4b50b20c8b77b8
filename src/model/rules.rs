// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/model/rules.rs - 规则分类器
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

use std::sync::Mutex;

use image::RgbImage;
use tracing::debug;

use crate::category::{WasteCategory, eco_tips};
use crate::model::features::{CannyConfig, FeatureVector, extract_features};
use crate::model::{Classification, ClassifyError, Model};
use crate::noise::{ConfidenceJitter, UniformJitter};

pub const CONFIDENCE_MIN: f32 = 0.35;
pub const CONFIDENCE_MAX: f32 = 0.95;

/// 其余类别得分全部低于该值时，兜底类别获得 +50。
const LANDFILL_FALLBACK_THRESHOLD: u32 = 60;

fn paper_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if (10.0..=30.0).contains(&f.avg_hue) {
    score += 30;
  }
  if (80.0..=200.0).contains(&f.avg_brightness) {
    score += 25;
  }
  if f.avg_saturation < 100.0 {
    score += 20;
  }
  if f.edge_density > 0.1 {
    score += 15;
  }
  if (f.avg_a - 128.0).abs() < 10.0 {
    score += 10;
  }
  score
}

fn plastic_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if f.avg_saturation > 80.0 {
    score += 25;
  }
  if f.std_brightness < 30.0 {
    score += 20;
  }
  if f.edge_density < 0.15 {
    score += 20;
  }
  if f.avg_brightness > 100.0 {
    score += 15;
  }
  if f.blue_dominant || f.red_dominant {
    score += 20;
  }
  score
}

fn glass_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if f.avg_brightness > 150.0 {
    score += 30;
  }
  if f.std_brightness > 40.0 {
    score += 30;
  }
  if f.avg_saturation < 50.0 {
    score += 20;
  }
  if f.edge_density < 0.1 {
    score += 20;
  }
  score
}

fn metal_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if (f.avg_a - 128.0).abs() < 15.0 && (f.avg_b - 128.0).abs() < 15.0 {
    score += 30;
  }
  if f.avg_brightness > 120.0 {
    score += 25;
  }
  if f.std_brightness > 35.0 {
    score += 25;
  }
  if f.avg_saturation < 50.0 {
    score += 20;
  }
  score
}

fn food_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if (5.0..=50.0).contains(&f.avg_hue) || (150.0..=180.0).contains(&f.avg_hue) {
    score += 25;
  }
  if f.avg_saturation > 40.0 && f.avg_saturation < 150.0 {
    score += 20;
  }
  if f.avg_brightness > 50.0 && f.avg_brightness < 180.0 {
    score += 20;
  }
  if f.edge_density > 0.15 {
    score += 20;
  }
  if f.std_hue > 15.0 {
    score += 15;
  }
  score
}

fn yard_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if (35.0..=85.0).contains(&f.avg_hue) {
    score += 35;
  }
  if f.green_dominant {
    score += 25;
  }
  if f.avg_saturation > 40.0 && f.avg_saturation < 180.0 {
    score += 20;
  }
  if f.edge_density > 0.2 {
    score += 20;
  }
  score
}

fn hazardous_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if (0.0..=15.0).contains(&f.avg_hue) || (160.0..=180.0).contains(&f.avg_hue) {
    score += 25;
  }
  if f.avg_saturation > 100.0 {
    score += 20;
  }
  if f.red_dominant {
    score += 20;
  }
  if f.edge_density > 0.2 {
    score += 15;
  }
  score
}

fn ewaste_score(f: &FeatureVector) -> u32 {
  let mut score = 0;
  if f.avg_brightness < 100.0 {
    score += 25;
  }
  if f.avg_saturation < 60.0 {
    score += 20;
  }
  if f.edge_density > 0.25 {
    score += 25;
  }
  if (f.avg_a - 128.0).abs() < 20.0 {
    score += 15;
  }
  if f.std_brightness > 30.0 {
    score += 15;
  }
  score
}

/// 按固定优先顺序为全部类别打分。
///
/// 兜底类别最后计算：其余类别全部低于阈值时 +50，
/// 中等饱和度配中等亮度再 +20。
pub fn score_categories(f: &FeatureVector) -> [(WasteCategory, u32); 9] {
  let paper = paper_score(f);
  let plastic = plastic_score(f);
  let glass = glass_score(f);
  let metal = metal_score(f);
  let food = food_score(f);
  let yard = yard_score(f);
  let hazardous = hazardous_score(f);
  let ewaste = ewaste_score(f);

  let others = [paper, plastic, glass, metal, food, yard, hazardous, ewaste];
  let mut landfill = 0;
  if others.iter().all(|&score| score < LANDFILL_FALLBACK_THRESHOLD) {
    landfill += 50;
  }
  if f.avg_saturation > 30.0
    && f.avg_saturation < 120.0
    && f.avg_brightness > 60.0
    && f.avg_brightness < 160.0
  {
    landfill += 20;
  }

  [
    (WasteCategory::Paper, paper),
    (WasteCategory::Plastic, plastic),
    (WasteCategory::Glass, glass),
    (WasteCategory::Metal, metal),
    (WasteCategory::Food, food),
    (WasteCategory::Yard, yard),
    (WasteCategory::Hazardous, hazardous),
    (WasteCategory::EWaste, ewaste),
    (WasteCategory::Landfill, landfill),
  ]
}

/// 取最高分类别；得分相同取排序靠前者。
pub fn select_category(scores: &[(WasteCategory, u32); 9]) -> (WasteCategory, u32) {
  let mut best = scores[0];
  for &(category, score) in &scores[1..] {
    if score > best.1 {
      best = (category, score);
    }
  }
  best
}

/// 得分折算为置信度，叠加扰动，两段都收束到 [CONFIDENCE_MIN, CONFIDENCE_MAX]。
pub fn confidence_from_score<J>(score: u32, jitter: &mut J) -> f32
where
  J: ConfidenceJitter + ?Sized,
{
  let base = (score as f32 / 100.0).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
  (base + jitter.sample()).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX)
}

/// 规则分类器。持有 Canny 阈值与一个扰动源。
pub struct RuleClassifier<J = UniformJitter> {
  canny: CannyConfig,
  jitter: Mutex<J>,
}

pub struct RuleClassifierBuilder<J> {
  canny: CannyConfig,
  jitter: J,
}

impl RuleClassifier<UniformJitter> {
  pub fn builder() -> RuleClassifierBuilder<UniformJitter> {
    RuleClassifierBuilder {
      canny: CannyConfig::default(),
      jitter: UniformJitter::from_entropy(),
    }
  }
}

impl<J> RuleClassifierBuilder<J> {
  pub fn canny(mut self, canny: CannyConfig) -> Self {
    self.canny = canny;
    self
  }

  pub fn jitter<K>(self, jitter: K) -> RuleClassifierBuilder<K> {
    RuleClassifierBuilder {
      canny: self.canny,
      jitter,
    }
  }

  pub fn build(self) -> RuleClassifier<J> {
    RuleClassifier {
      canny: self.canny,
      jitter: Mutex::new(self.jitter),
    }
  }
}

impl<J> RuleClassifier<J> {
  /// 用调用方提供的扰动源完成一次分类。
  pub fn classify_with<K>(
    &self,
    image: &RgbImage,
    jitter: &mut K,
  ) -> Result<Classification, ClassifyError>
  where
    K: ConfidenceJitter + ?Sized,
  {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
      return Err(ClassifyError::InvalidImage { width, height });
    }

    let features = extract_features(image, &self.canny)?;
    let scores = score_categories(&features);
    debug!("类别得分: {:?}", scores);

    let (category, raw_score) = select_category(&scores);
    let confidence = confidence_from_score(raw_score, jitter);
    debug!(
      "最优类别: {} 原始得分: {} 置信度: {:.2}",
      category.id(),
      raw_score,
      confidence
    );

    Ok(Classification {
      category,
      raw_score,
      confidence,
      profile: category.profile(),
      tips: eco_tips(category, confidence),
    })
  }
}

impl<J: ConfidenceJitter> Model for RuleClassifier<J> {
  type Input = RgbImage;
  type Output = Classification;
  type Error = ClassifyError;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    let mut jitter = self.jitter.lock().unwrap();
    self.classify_with(input, &mut *jitter)
  }
}
