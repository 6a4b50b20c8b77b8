// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/output/directory_record.rs - 目录记录输出
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
use std::sync::Mutex;

use chrono::{Datelike, Utc};
use image::RgbImage;
use thiserror::Error;

use crate::model::ClassifyOutcome;
use crate::output::{Render, classification_document};
use crate::{FromUrl, FromUrlWithScheme};

#[derive(Error, Debug)]
pub enum DirectoryRecordOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("图像错误: {0}")]
  Image(#[from] image::ImageError),
  #[error("I/O 错误: {0}")]
  Io(#[from] std::io::Error),
  #[error("JSON 序列化错误: {0}")]
  Json(#[from] serde_json::Error),
}

/// 按日期归档的目录输出。
///
/// 每帧在 `年/月/日` 子目录下落一份 JSON 记录，
/// URI 带 `?image` 时在旁边同名保存一份 PNG 帧。
pub struct DirectoryRecordOutput {
  directory: PathBuf,
  frame_counters: Mutex<u16>,
  save_image: bool,
}

impl FromUrlWithScheme for DirectoryRecordOutput {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(DirectoryRecordOutputError::SchemeMismatch);
    }

    let save_image = url.query_pairs().any(|(key, _)| key == "image");

    Ok(DirectoryRecordOutput {
      directory: PathBuf::from(url.path()),
      frame_counters: Mutex::new(0),
      save_image,
    })
  }
}

impl DirectoryRecordOutput {
  fn frame_id(&self) -> u16 {
    let mut counter = self.frame_counters.lock().unwrap();
    let id = *counter + 1;
    *counter = id;
    id
  }

  /// 当天的归档目录加上不带扩展名的帧文件名。
  fn frame_path(&self) -> Result<PathBuf, DirectoryRecordOutputError> {
    let now = Utc::now();
    let directory = self
      .directory
      .join(now.year().to_string())
      .join(format!("{:02}", now.month()))
      .join(format!("{:02}", now.day()));
    if !directory.exists() {
      std::fs::create_dir_all(&directory)?;
    }

    Ok(directory.join(format!(
      "{}-{:04X}",
      now.format("%H-%M-%S"),
      self.frame_id()
    )))
  }
}

impl Render<RgbImage, ClassifyOutcome> for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn render_result(&self, frame: &RgbImage, result: &ClassifyOutcome) -> Result<(), Self::Error> {
    let base = self.frame_path()?;
    let document = classification_document(result);
    std::fs::write(
      base.with_extension("json"),
      serde_json::to_string_pretty(&document)?,
    )?;
    if self.save_image {
      frame.save(base.with_extension("png"))?;
    }
    Ok(())
  }
}
