// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/bin/feature_dump.rs - 特征向量导出工具
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

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use url::Url;

use qingshan::{
  FromUrl,
  input::ImageFileInput,
  model::{CannyConfig, extract_features},
};

/// 导出单张图片的特征统计量，供调整规则表时观察。
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// 输入图片 (image:///path/to/photo.jpg)
  #[arg(long, value_name = "SOURCE")]
  input: Url,

  /// Canny 边缘检测低阈值
  #[arg(long, default_value_t = 50.0, value_name = "THRESHOLD")]
  canny_low: f32,

  /// Canny 边缘检测高阈值
  #[arg(long, default_value_t = 150.0, value_name = "THRESHOLD")]
  canny_high: f32,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();
  let canny = CannyConfig {
    low: args.canny_low,
    high: args.canny_high,
  };

  let mut input = ImageFileInput::from_url(&args.input)?;
  let image = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;
  let features = extract_features(&image, &canny)?;

  let document = json!({
    "avg_hue": features.avg_hue,
    "std_hue": features.std_hue,
    "avg_saturation": features.avg_saturation,
    "avg_value": features.avg_value,
    "avg_a": features.avg_a,
    "avg_b": features.avg_b,
    "avg_blue": features.avg_blue,
    "avg_green": features.avg_green,
    "avg_red": features.avg_red,
    "avg_brightness": features.avg_brightness,
    "std_brightness": features.std_brightness,
    "edge_density": features.edge_density,
    "blue_dominant": features.blue_dominant,
    "green_dominant": features.green_dominant,
    "red_dominant": features.red_dominant,
  });
  println!("{}", serde_json::to_string_pretty(&document)?);

  Ok(())
}
