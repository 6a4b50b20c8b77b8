// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/input/directory.rs - 目录批量输入
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

use std::path::PathBuf;

use image::{ImageReader, RgbImage};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

#[derive(Error, Debug)]
pub enum DirectoryInputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("I/O 错误: {0}")]
  Io(#[from] std::io::Error),
}

/// 目录输入，按文件名顺序逐张产出目录下的图像。
pub struct DirectoryInput {
  entries: std::vec::IntoIter<PathBuf>,
}

impl FromUrlWithScheme for DirectoryInput {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for DirectoryInput {
  type Error = DirectoryInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(DirectoryInputError::SchemeMismatch);
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(url.path())? {
      let path = entry?.path();
      let is_image = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
          let lower = extension.to_lowercase();
          IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false);
      if is_image {
        entries.push(path);
      }
    }
    entries.sort();
    info!("目录 {} 中找到 {} 张图像", url.path(), entries.len());

    Ok(DirectoryInput {
      entries: entries.into_iter(),
    })
  }
}

impl Iterator for DirectoryInput {
  type Item = RgbImage;

  fn next(&mut self) -> Option<Self::Item> {
    // 单个文件坏掉只跳过这一帧，不中断整个批次
    for path in self.entries.by_ref() {
      let reader = match ImageReader::open(&path) {
        Ok(reader) => reader,
        Err(err) => {
          warn!("跳过无法读取的文件 {}: {}", path.display(), err);
          continue;
        }
      };
      match reader.decode() {
        Ok(image) => return Some(image.into_rgb8()),
        Err(err) => warn!("跳过无法解码的文件 {}: {}", path.display(), err),
      }
    }
    None
  }
}
