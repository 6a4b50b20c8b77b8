// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/args.rs - 项目参数配置
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

use clap::Parser;
use url::Url;

/// Qingshan 废弃物分类参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入来源
  /// 支持方案:
  /// - 单张图片: image:///path/to/photo.jpg
  /// - 图片目录: folder:///path/to/photos
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,

  /// 输出端
  /// 支持方案:
  /// - 控制台日志: console:
  /// - JSON 文件: json:///path/to/result.json
  /// - 按日期归档的记录目录: folder:///path/to/records
  #[arg(long, value_name = "OUTPUT")]
  pub output: Url,

  /// Canny 边缘检测低阈值
  #[arg(long, default_value_t = 50.0, value_name = "THRESHOLD")]
  pub canny_low: f32,

  /// Canny 边缘检测高阈值
  #[arg(long, default_value_t = 150.0, value_name = "THRESHOLD")]
  pub canny_high: f32,

  /// 置信度扰动的随机种子，缺省时使用系统熵
  #[arg(long, value_name = "SEED")]
  pub seed: Option<u64>,

  /// 处理输入里的每一帧，而不是只取第一帧
  #[arg(long)]
  pub batch: bool,
}
