// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/output/mod.rs - 分类结果输出模块
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
use serde_json::json;
use thiserror::Error;

use crate::FromUrl;
use crate::model::ClassifyOutcome;

mod console;
mod directory_record;
mod json_file;

pub use self::console::{ConsoleOutput, ConsoleOutputError};
pub use self::directory_record::{DirectoryRecordOutput, DirectoryRecordOutputError};
pub use self::json_file::{JsonFileOutput, JsonFileOutputError};

/// 分类结果的渲染端。
///
/// `Frame` 是产出结果的原始帧，`Output` 是要渲染的结果本身。
/// 输出端接收整个结果值，分类失败时也要产出一条记录。
pub trait Render<Frame, Output>: Sized {
  type Error;

  fn render_result(&self, frame: &Frame, result: &Output) -> Result<(), Self::Error>;
}

/// 把一次分类的结果转成统一的 JSON 文档。
///
/// 失败的分类同样产出文档，类别标记为 unknown，置信度为零。
pub fn classification_document(result: &ClassifyOutcome) -> serde_json::Value {
  match result {
    Ok(classification) => json!({
      "waste_type": classification.category.id(),
      "category_name": classification.profile.name,
      "confidence": (classification.confidence as f64 * 100.0).round() / 100.0,
      "subcategories": classification.profile.subcategories,
      "disposal_instructions": classification.profile.disposal_instructions,
      "recycling_code": classification.profile.recycling_code,
      "contamination_warnings": classification.profile.contamination_warnings,
      "tips": classification.tips,
    }),
    Err(err) => json!({
      "error": err.to_string(),
      "waste_type": "unknown",
      "confidence": 0.0,
    }),
  }
}

#[derive(Error, Debug)]
pub enum OutputError {
  #[error("控制台输出错误: {0}")]
  Console(#[from] ConsoleOutputError),
  #[error("JSON 文件输出错误: {0}")]
  JsonFile(#[from] JsonFileOutputError),
  #[error("目录记录输出错误: {0}")]
  DirectoryRecord(#[from] DirectoryRecordOutputError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum OutputWrapper {
  Console(ConsoleOutput),
  JsonFile(JsonFileOutput),
  DirectoryRecord(DirectoryRecordOutput),
}

impl FromUrl for OutputWrapper {
  type Error = OutputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    use crate::FromUrlWithScheme;

    match url.scheme() {
      ConsoleOutput::SCHEME => Ok(OutputWrapper::Console(ConsoleOutput::from_url(url)?)),
      JsonFileOutput::SCHEME => Ok(OutputWrapper::JsonFile(JsonFileOutput::from_url(url)?)),
      DirectoryRecordOutput::SCHEME => Ok(OutputWrapper::DirectoryRecord(
        DirectoryRecordOutput::from_url(url)?,
      )),
      other => Err(OutputError::SchemeMismatch(other.to_string())),
    }
  }
}

impl Render<RgbImage, ClassifyOutcome> for OutputWrapper {
  type Error = OutputError;

  fn render_result(&self, frame: &RgbImage, result: &ClassifyOutcome) -> Result<(), Self::Error> {
    match self {
      OutputWrapper::Console(output) => output
        .render_result(frame, result)
        .map_err(OutputError::from),
      OutputWrapper::JsonFile(output) => output
        .render_result(frame, result)
        .map_err(OutputError::from),
      OutputWrapper::DirectoryRecord(output) => output
        .render_result(frame, result)
        .map_err(OutputError::from),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::category::{WasteCategory, eco_tips};
  use crate::model::{Classification, ClassifyError};

  fn sample_classification(confidence: f32) -> Classification {
    let category = WasteCategory::Paper;
    Classification {
      category,
      raw_score: (confidence * 100.0) as u32,
      confidence,
      profile: category.profile(),
      tips: eco_tips(category, confidence),
    }
  }

  #[test]
  fn document_for_successful_classification() {
    let document = classification_document(&Ok(sample_classification(0.75)));
    assert_eq!(document["waste_type"], "recyclable_paper");
    assert_eq!(document["category_name"], "Paper & Cardboard");
    assert_eq!(document["confidence"], 0.75);
    assert!(document["subcategories"].is_array());
    assert!(document["tips"].as_array().unwrap().len() >= 2);
    assert!(document.get("error").is_none());
  }

  #[test]
  fn document_confidence_is_rounded() {
    let mut classification = sample_classification(0.75);
    classification.confidence = 0.734_567;
    let document = classification_document(&Ok(classification));
    assert_eq!(document["confidence"], 0.73);
  }

  #[test]
  fn document_for_failed_classification() {
    let error = ClassifyError::InvalidImage {
      width: 0,
      height: 7,
    };
    let document = classification_document(&Err(error));
    assert_eq!(document["waste_type"], "unknown");
    assert_eq!(document["confidence"], 0.0);
    assert_eq!(document["error"], "图像尺寸无效: 0x7");
  }

  #[test]
  fn wrapper_rejects_unknown_scheme() {
    let url = url::Url::parse("ftp://somewhere/out").unwrap();
    assert!(matches!(
      OutputWrapper::from_url(&url),
      Err(OutputError::SchemeMismatch(scheme)) if scheme == "ftp"
    ));
  }
}
