// 该文件是 Qingshan （青山绿水） 项目的一部分。
// tests/classification.rs - 分类流程集成测试
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

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};
use proptest::prelude::*;

use qingshan::category::{GENERAL_TIPS, LOW_CONFIDENCE_TIP, WasteCategory};
use qingshan::input::{decode_base64_image, decode_image};
use qingshan::model::{
  CONFIDENCE_MAX, CONFIDENCE_MIN, ClassifyError, FeatureVector, Model, RuleClassifier,
  confidence_from_score, score_categories, select_category,
};
use qingshan::noise::{NoJitter, UniformJitter};

fn deterministic_classifier() -> RuleClassifier<NoJitter> {
  RuleClassifier::builder().jitter(NoJitter).build()
}

/// 均匀的灰青色块：没有哪个类别的规则能攒到 60 分，落到兜底类别。
#[test]
fn featureless_image_falls_back_to_landfill() {
  let image = RgbImage::from_pixel(64, 64, Rgb([90, 125, 125]));
  let classification = deterministic_classifier().infer(&image).unwrap();

  assert_eq!(classification.category, WasteCategory::Landfill);
  assert_eq!(classification.profile.id, "landfill_general");
  assert_eq!(classification.raw_score, 70);
  assert!((classification.confidence - 0.70).abs() < 1e-6);
  assert_eq!(classification.tips, &GENERAL_TIPS[..2]);
}

/// 黑白对半的图：中性色、高亮度方差、低饱和度正中金属规则的全部条件。
#[test]
fn high_contrast_neutral_image_reads_as_metal() {
  let mut image = RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]));
  for y in 0..64 {
    for x in 32..64 {
      image.put_pixel(x, y, Rgb([255, 255, 255]));
    }
  }
  let classification = deterministic_classifier().infer(&image).unwrap();

  assert_eq!(classification.category, WasteCategory::Metal);
  assert_eq!(classification.raw_score, 100);
  assert!((classification.confidence - CONFIDENCE_MAX).abs() < 1e-6);
}

/// 高饱和的蓝色块命中塑料规则的大部分条件。
#[test]
fn saturated_blue_image_reads_as_plastic() {
  let image = RgbImage::from_pixel(64, 64, Rgb([50, 100, 200]));
  let classification = deterministic_classifier().infer(&image).unwrap();

  assert_eq!(classification.category, WasteCategory::Plastic);
  assert_eq!(classification.raw_score, 85);
  assert!((classification.confidence - 0.85).abs() < 1e-6);
}

#[test]
fn low_confidence_result_carries_advisory_tip() {
  let image = RgbImage::from_pixel(64, 64, Rgb([90, 125, 125]));
  let classification = RuleClassifier::builder()
    .jitter(UniformJitter::from_seed(3))
    .build()
    .infer(&image)
    .unwrap();

  if classification.confidence < 0.7 {
    assert!(classification.tips.contains(&LOW_CONFIDENCE_TIP));
  } else {
    assert!(!classification.tips.contains(&LOW_CONFIDENCE_TIP));
  }
  let trailing = &classification.tips[classification.tips.len() - 2..];
  assert_eq!(trailing, &GENERAL_TIPS[..2]);
}

#[test]
fn same_seed_reproduces_confidence() {
  let image = RgbImage::from_pixel(48, 48, Rgb([50, 100, 200]));

  let first = RuleClassifier::builder()
    .jitter(UniformJitter::from_seed(42))
    .build()
    .infer(&image)
    .unwrap();
  let second = RuleClassifier::builder()
    .jitter(UniformJitter::from_seed(42))
    .build()
    .infer(&image)
    .unwrap();

  assert_eq!(first.category, second.category);
  assert_eq!(first.confidence, second.confidence);
  assert!((CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&first.confidence));
}

#[test]
fn zero_sized_image_is_rejected() {
  let image = RgbImage::new(0, 0);
  let result = deterministic_classifier().infer(&image);
  assert!(matches!(
    result,
    Err(ClassifyError::InvalidImage {
      width: 0,
      height: 0
    })
  ));
}

#[test]
fn png_payload_round_trips_through_base64() {
  let image = RgbImage::from_pixel(5, 4, Rgb([10, 200, 30]));
  let mut png = Vec::new();
  image
    .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
    .unwrap();

  let encoded = format!("data:image/png;base64,{}", STANDARD.encode(&png));
  let decoded = decode_base64_image(&encoded).unwrap();
  assert_eq!(decoded.dimensions(), (5, 4));
  assert_eq!(decoded.get_pixel(0, 0), &Rgb([10, 200, 30]));
}

#[test]
fn decoded_png_classifies_like_the_original() {
  let image = RgbImage::from_pixel(64, 64, Rgb([50, 100, 200]));
  let mut png = Vec::new();
  image
    .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
    .unwrap();

  let decoded = decode_image(&png).unwrap();
  let classification = deterministic_classifier().infer(&decoded).unwrap();
  assert_eq!(classification.category, WasteCategory::Plastic);
  assert_eq!(classification.raw_score, 85);
}

prop_compose! {
  fn arb_features()(
    avg_hue in 0.0f32..180.0,
    std_hue in 0.0f32..90.0,
    avg_saturation in 0.0f32..255.0,
    avg_value in 0.0f32..255.0,
    avg_a in 100.0f32..156.0,
    avg_b in 100.0f32..156.0,
    avg_blue in 0.0f32..255.0,
    avg_green in 0.0f32..255.0,
    avg_red in 0.0f32..255.0,
    avg_brightness in 0.0f32..255.0,
    std_brightness in 0.0f32..128.0,
    edge_density in 0.0f32..1.0,
    blue_dominant in any::<bool>(),
    green_dominant in any::<bool>(),
    red_dominant in any::<bool>(),
  ) -> FeatureVector {
    FeatureVector {
      avg_hue,
      std_hue,
      avg_saturation,
      avg_value,
      avg_a,
      avg_b,
      avg_blue,
      avg_green,
      avg_red,
      avg_brightness,
      std_brightness,
      edge_density,
      blue_dominant,
      green_dominant,
      red_dominant,
    }
  }
}

proptest! {
  #[test]
  fn scores_follow_category_order(features in arb_features()) {
    let scores = score_categories(&features);
    for (entry, expected) in scores.iter().zip(WasteCategory::ALL.iter()) {
      prop_assert_eq!(entry.0, *expected);
    }
  }

  #[test]
  fn selected_category_is_first_maximum(features in arb_features()) {
    let scores = score_categories(&features);
    let (winner, score) = select_category(&scores);
    let max = scores.iter().map(|(_, s)| *s).max().unwrap();
    prop_assert_eq!(score, max);
    for (category, other) in scores.iter() {
      if *category == winner {
        break;
      }
      prop_assert!(*other < score);
    }
  }

  #[test]
  fn confidence_stays_in_bounds(score in 0u32..200) {
    let confidence = confidence_from_score(score, &mut NoJitter);
    prop_assert!((CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&confidence));

    let mut jitter = UniformJitter::from_seed(score as u64);
    let jittered = confidence_from_score(score, &mut jitter);
    prop_assert!((CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&jittered));
  }
}
