// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/model/features.rs - 图像特征提取
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

use image::{GrayImage, Luma, RgbImage, imageops};
use imageproc::edges::canny;
use palette::{IntoColor, Lab, Srgb};
use thiserror::Error;

/// 特征统计统一在该分辨率下计算。
pub const FEATURE_SIZE: u32 = 224;

/// Canny 边缘检测阈值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyConfig {
  pub low: f32,
  pub high: f32,
}

impl Default for CannyConfig {
  fn default() -> Self {
    CannyConfig {
      low: 50.0,
      high: 150.0,
    }
  }
}

#[derive(Error, Debug)]
pub enum FeatureError {
  #[error("图像尺寸为零: {width}x{height}")]
  EmptyImage { width: u32, height: u32 },
}

/// 分类规则所依赖的颜色与纹理统计量。
///
/// 色调使用 0-180 刻度，饱和度、明度与各通道均值使用 0-255 刻度，
/// Lab 的 a/b 分量以 128 为中性点。
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
  pub avg_hue: f32,
  pub std_hue: f32,
  pub avg_saturation: f32,
  pub avg_value: f32,
  pub avg_a: f32,
  pub avg_b: f32,
  pub avg_blue: f32,
  pub avg_green: f32,
  pub avg_red: f32,
  pub avg_brightness: f32,
  pub std_brightness: f32,
  pub edge_density: f32,
  pub blue_dominant: bool,
  pub green_dominant: bool,
  pub red_dominant: bool,
}

/// 从任意分辨率的 RGB 图像计算完整的特征向量。
pub fn extract_features(
  image: &RgbImage,
  canny_config: &CannyConfig,
) -> Result<FeatureVector, FeatureError> {
  let (width, height) = image.dimensions();
  if width == 0 || height == 0 {
    return Err(FeatureError::EmptyImage { width, height });
  }

  let resized = imageops::resize(
    image,
    FEATURE_SIZE,
    FEATURE_SIZE,
    imageops::FilterType::Triangle,
  );
  let pixel_count = (FEATURE_SIZE * FEATURE_SIZE) as f32;

  let mut sum_hue = 0.0f32;
  let mut sum_hue_sq = 0.0f32;
  let mut sum_saturation = 0.0f32;
  let mut sum_value = 0.0f32;
  let mut sum_a = 0.0f32;
  let mut sum_b = 0.0f32;
  let mut sum_blue = 0.0f32;
  let mut sum_green = 0.0f32;
  let mut sum_red = 0.0f32;
  let mut sum_luma = 0.0f32;
  let mut sum_luma_sq = 0.0f32;
  let mut gray = GrayImage::new(FEATURE_SIZE, FEATURE_SIZE);

  for (x, y, pixel) in resized.enumerate_pixels() {
    let [r, g, b] = pixel.0;

    let (hue, saturation, value) = rgb_to_hsv(r, g, b);
    sum_hue += hue;
    sum_hue_sq += hue * hue;
    sum_saturation += saturation;
    sum_value += value;

    let (lab_a, lab_b) = rgb_to_lab_chroma(r, g, b);
    sum_a += lab_a;
    sum_b += lab_b;

    sum_blue += b as f32;
    sum_green += g as f32;
    sum_red += r as f32;

    let luma = luma_rec601(r, g, b);
    sum_luma += luma;
    sum_luma_sq += luma * luma;
    gray.put_pixel(x, y, Luma([luma.round() as u8]));
  }

  let avg_hue = sum_hue / pixel_count;
  let std_hue = (sum_hue_sq / pixel_count - avg_hue * avg_hue).max(0.0).sqrt();
  let avg_brightness = sum_luma / pixel_count;
  let std_brightness = (sum_luma_sq / pixel_count - avg_brightness * avg_brightness)
    .max(0.0)
    .sqrt();

  let edges = canny(&gray, canny_config.low, canny_config.high);
  let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
  let edge_density = edge_pixels as f32 / pixel_count;

  let avg_blue = sum_blue / pixel_count;
  let avg_green = sum_green / pixel_count;
  let avg_red = sum_red / pixel_count;

  Ok(FeatureVector {
    avg_hue,
    std_hue,
    avg_saturation: sum_saturation / pixel_count,
    avg_value: sum_value / pixel_count,
    avg_a: sum_a / pixel_count,
    avg_b: sum_b / pixel_count,
    avg_blue,
    avg_green,
    avg_red,
    avg_brightness,
    std_brightness,
    edge_density,
    blue_dominant: avg_blue > avg_green.max(avg_red),
    green_dominant: avg_green > avg_blue.max(avg_red),
    red_dominant: avg_red > avg_blue.max(avg_green),
  })
}

/// HSV 转换，色调折半到 0-180，饱和度与明度放大到 0-255。
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
  let rf = r as f32 / 255.0;
  let gf = g as f32 / 255.0;
  let bf = b as f32 / 255.0;

  let max = rf.max(gf).max(bf);
  let min = rf.min(gf).min(bf);
  let delta = max - min;

  let mut hue_deg = if delta == 0.0 {
    0.0
  } else if max == rf {
    60.0 * ((gf - bf) / delta)
  } else if max == gf {
    60.0 * (2.0 + (bf - rf) / delta)
  } else {
    60.0 * (4.0 + (rf - gf) / delta)
  };
  if hue_deg < 0.0 {
    hue_deg += 360.0;
  }

  let saturation = if max > 0.0 { delta / max * 255.0 } else { 0.0 };
  (hue_deg / 2.0, saturation, max * 255.0)
}

/// Lab 的 a/b 色度分量，平移 128 使中性灰落在 128。
fn rgb_to_lab_chroma(r: u8, g: u8, b: u8) -> (f32, f32) {
  let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
  let lab: Lab = srgb.into_color();
  (lab.a + 128.0, lab.b + 128.0)
}

/// Rec. 601 亮度。灰度统计与边缘检测共用同一套权重。
fn luma_rec601(r: u8, g: u8, b: u8) -> f32 {
  0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}
