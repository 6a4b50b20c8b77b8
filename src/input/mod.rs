// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/input/mod.rs - 图像输入模块
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

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbImage;
use thiserror::Error;

use crate::FromUrl;

mod directory;
mod image_file;

pub use self::directory::{DirectoryInput, DirectoryInputError};
pub use self::image_file::{ImageFileInput, ImageFileInputError};

#[derive(Error, Debug)]
pub enum DecodeError {
  #[error("无法解码 {0} 字节的图像数据")]
  UnsupportedFormat(usize),
  #[error("Base64 解码失败: {0}")]
  Base64(#[from] base64::DecodeError),
}

/// 解码图像字节流。
///
/// 先交给格式嗅探，失败后尝试原始 RGB 方阵布局：
/// 长度是 3 的倍数且像素数是完全平方数时按边长重建。
pub fn decode_image(data: &[u8]) -> Result<RgbImage, DecodeError> {
  if let Ok(image) = image::load_from_memory(data) {
    return Ok(image.into_rgb8());
  }

  if data.len() % 3 == 0 {
    let pixels = data.len() / 3;
    let side = (pixels as f64).sqrt() as usize;
    if side > 0 && side * side == pixels {
      if let Some(image) = RgbImage::from_raw(side as u32, side as u32, data.to_vec()) {
        return Ok(image);
      }
    }
  }

  Err(DecodeError::UnsupportedFormat(data.len()))
}

/// 解码 Base64 图像负载，兼容 `data:...;base64,` 前缀。
pub fn decode_base64_image(data: &str) -> Result<RgbImage, DecodeError> {
  let payload = match data.split_once(',') {
    Some((_, rest)) => rest,
    None => data,
  };
  let bytes = STANDARD.decode(payload.trim())?;
  decode_image(&bytes)
}

#[derive(Error, Debug)]
pub enum InputError {
  #[error("图像文件输入错误: {0}")]
  ImageFile(#[from] ImageFileInputError),
  #[error("目录输入错误: {0}")]
  Directory(#[from] DirectoryInputError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum InputWrapper {
  ImageFile(ImageFileInput),
  Directory(DirectoryInput),
}

impl FromUrl for InputWrapper {
  type Error = InputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    use crate::FromUrlWithScheme;

    match url.scheme() {
      ImageFileInput::SCHEME => Ok(InputWrapper::ImageFile(ImageFileInput::from_url(url)?)),
      DirectoryInput::SCHEME => Ok(InputWrapper::Directory(DirectoryInput::from_url(url)?)),
      other => Err(InputError::SchemeMismatch(other.to_string())),
    }
  }
}

impl Iterator for InputWrapper {
  type Item = RgbImage;

  fn next(&mut self) -> Option<Self::Item> {
    match self {
      InputWrapper::ImageFile(input) => input.next(),
      InputWrapper::Directory(input) => input.next(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_raw_square_buffer() {
    // 2x2 像素，12 字节
    let data = [10u8; 12];
    let image = decode_image(&data).unwrap();
    assert_eq!(image.dimensions(), (2, 2));
  }

  #[test]
  fn rejects_non_square_raw_buffer() {
    let data = [10u8; 9]; // 3 像素不是完全平方数
    assert!(matches!(
      decode_image(&data),
      Err(DecodeError::UnsupportedFormat(9))
    ));
  }

  #[test]
  fn rejects_garbage_bytes() {
    let data = [1u8, 2, 3, 4, 5, 6, 7];
    assert!(matches!(
      decode_image(&data),
      Err(DecodeError::UnsupportedFormat(7))
    ));
  }

  #[test]
  fn base64_strips_data_uri_prefix() {
    let raw = [20u8; 12];
    let encoded = format!("data:image/octet-stream;base64,{}", STANDARD.encode(raw));
    let image = decode_base64_image(&encoded).unwrap();
    assert_eq!(image.dimensions(), (2, 2));
  }

  #[test]
  fn base64_without_prefix() {
    let raw = [20u8; 12];
    let image = decode_base64_image(&STANDARD.encode(raw)).unwrap();
    assert_eq!(image.dimensions(), (2, 2));
  }

  #[test]
  fn invalid_base64_is_reported() {
    assert!(matches!(
      decode_base64_image("not-base64!!!"),
      Err(DecodeError::Base64(_))
    ));
  }
}
