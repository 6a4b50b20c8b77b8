// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/product.rs - 商品环保度分析
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

use image::RgbImage;
use tracing::{debug, warn};

/// 正面关键词及其得分。命中判定按小写子串匹配。
pub static ECO_KEYWORDS: [(&str, i32); 8] = [
  ("organic", 2),
  ("recyclable", 2),
  ("biodegradable", 2),
  ("compostable", 2),
  ("sustainable", 2),
  ("natural", 1),
  ("eco", 1),
  ("green", 1),
];

/// 负面关键词及其扣分。
pub static NEGATIVE_KEYWORDS: [(&str, i32); 4] = [
  ("plastic", -1),
  ("chemical", -1),
  ("toxic", -2),
  ("pollution", -2),
];

/// 包装材质及其得分权重。
static PACKAGING_MATERIALS: [(&str, i32); 8] = [
  ("plastic", -2),
  ("glass", 1),
  ("metal", 1),
  ("aluminium", 1),
  ("steel", 1),
  ("cardboard", 2),
  ("paper", 2),
  ("wood", 2),
];

/// 商品库返回的条目。查不到时 `found` 为 false，其余字段为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInfo {
  pub found: bool,
  pub product_name: String,
  pub brands: String,
  pub categories: String,
  pub nutriscore_grade: String,
  pub ecoscore_grade: String,
  pub packaging: String,
  pub labels: String,
}

/// 条码到商品条目的查询端，由外部商品库实现。
pub trait BarcodeLookup {
  type Error: std::error::Error;

  fn lookup(&self, barcode: &str) -> Result<ProductInfo, Self::Error>;
}

/// 图像到文本的识别端，由外部 OCR 服务实现。
pub trait OcrService {
  fn extract_text(&self, image: &RgbImage) -> String;
}

/// 关键词打分的结果。
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactAnalysis {
  pub sustainability_score: i32,
  pub found_keywords: Vec<(&'static str, i32)>,
  pub extracted_text: String,
}

/// 对一段商品文本做关键词环保度打分。
///
/// 命中的关键词按词表顺序报告，总分向下取零，
/// 超过 100 个字符的文本截断后追加省略号。
pub fn analyze_product_impact(text: &str) -> ImpactAnalysis {
  let text_lower = text.to_lowercase();

  let mut score = 0;
  let mut found_keywords = Vec::new();
  for (keyword, points) in ECO_KEYWORDS.iter().chain(NEGATIVE_KEYWORDS.iter()) {
    if text_lower.contains(keyword) {
      score += points;
      found_keywords.push((*keyword, *points));
    }
  }

  let extracted_text = if text.chars().count() > 100 {
    let mut excerpt: String = text.chars().take(100).collect();
    excerpt.push_str("...");
    excerpt
  } else {
    text.to_string()
  };

  ImpactAnalysis {
    sustainability_score: score.max(0),
    found_keywords,
    extracted_text,
  }
}

/// 从包装描述里识别材质，返回命中的材质名和向下取零的包装得分。
pub fn extract_packaging_materials(packaging: &str) -> (Vec<&'static str>, i32) {
  let packaging_lower = packaging.to_lowercase();

  let mut materials = Vec::new();
  let mut score = 0;
  for (material, points) in PACKAGING_MATERIALS.iter() {
    if packaging_lower.contains(material) {
      materials.push(*material);
      score += points;
    }
  }

  (materials, score.max(0))
}

/// 按总分分档给出建议。
pub fn recommendation_for_score(score: i32) -> &'static str {
  match score {
    6.. => "Excellent choice with strong sustainability signals",
    3..=5 => "Good environmental profile, prefer refill or bulk options where available",
    1..=2 => "Moderate impact, check for a recyclable packaging variant",
    _ => "High environmental impact, consider a certified sustainable alternative",
  }
}

/// 一次商品分析的完整结果。
#[derive(Debug, Clone)]
pub struct ProductAnalysis {
  pub sustainability_score: i32,
  pub packaging_score: i32,
  pub packaging_materials: Vec<&'static str>,
  pub confidence: f32,
  pub barcode_detected: bool,
  pub found_keywords: Vec<(&'static str, i32)>,
  pub extracted_text: String,
  pub recommendation: &'static str,
  pub product: Option<ProductInfo>,
}

/// 组合条码查询与 OCR 两条通路的商品分析器。
///
/// 条码命中商品库时走库内字段，查询失败或查不到时退回 OCR 文本。
pub struct ProductAnalyzer<B, O> {
  barcode: B,
  ocr: O,
}

impl<B: BarcodeLookup, O: OcrService> ProductAnalyzer<B, O> {
  pub fn new(barcode: B, ocr: O) -> Self {
    ProductAnalyzer { barcode, ocr }
  }

  pub fn analyze(&self, image: &RgbImage, barcode: Option<&str>) -> ProductAnalysis {
    if let Some(code) = barcode {
      match self.barcode.lookup(code) {
        Ok(info) if info.found => return self.analyze_catalog_entry(info),
        Ok(_) => debug!("条码 {} 在商品库中没有记录", code),
        Err(err) => warn!("条码 {} 查询失败: {}", code, err),
      }
    }
    self.analyze_by_text(image, barcode.is_some())
  }

  fn analyze_catalog_entry(&self, info: ProductInfo) -> ProductAnalysis {
    let text = format!(
      "{} {} {} {}",
      info.product_name, info.categories, info.labels, info.packaging
    );
    let impact = analyze_product_impact(&text);
    let (packaging_materials, packaging_score) = extract_packaging_materials(&info.packaging);
    let recommendation =
      recommendation_for_score(impact.sustainability_score + packaging_score);

    ProductAnalysis {
      sustainability_score: impact.sustainability_score,
      packaging_score,
      packaging_materials,
      confidence: 0.9,
      barcode_detected: true,
      found_keywords: impact.found_keywords,
      extracted_text: impact.extracted_text,
      recommendation,
      product: Some(info),
    }
  }

  fn analyze_by_text(&self, image: &RgbImage, barcode_detected: bool) -> ProductAnalysis {
    let text = self.ocr.extract_text(image);
    let confidence = if text.trim().is_empty() { 0.3 } else { 0.6 };
    let impact = analyze_product_impact(&text);
    let recommendation = recommendation_for_score(impact.sustainability_score);

    ProductAnalysis {
      sustainability_score: impact.sustainability_score,
      packaging_score: 0,
      packaging_materials: Vec::new(),
      confidence,
      barcode_detected,
      found_keywords: impact.found_keywords,
      extracted_text: impact.extracted_text,
      recommendation,
      product: None,
    }
  }
}
