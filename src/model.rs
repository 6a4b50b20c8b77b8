// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/model.rs - 模型
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

use thiserror::Error;

use crate::category::{CategoryProfile, WasteCategory};

pub trait Model {
  type Input;
  type Output;
  type Error;

  fn infer(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// 单张图片的分类结果。
#[derive(Debug, Clone)]
pub struct Classification {
  pub category: WasteCategory,
  /// 规则表的原始得分，范围 0-100。
  pub raw_score: u32,
  /// 置信度，始终落在 [0.35, 0.95]。
  pub confidence: f32,
  pub profile: &'static CategoryProfile,
  pub tips: Vec<&'static str>,
}

/// 一次分类调用的完整结果。失败也是一种要渲染的结果。
pub type ClassifyOutcome = Result<Classification, ClassifyError>;

#[derive(Error, Debug)]
pub enum ClassifyError {
  #[error("图像尺寸无效: {width}x{height}")]
  InvalidImage { width: u32, height: u32 },
  #[error("特征提取失败: {0}")]
  ClassificationFailed(#[from] FeatureError),
}

mod features;
mod rules;

pub use self::features::{CannyConfig, FeatureError, FeatureVector, extract_features};
pub use self::rules::{
  CONFIDENCE_MAX, CONFIDENCE_MIN, RuleClassifier, RuleClassifierBuilder, confidence_from_score,
  score_categories, select_category,
};
