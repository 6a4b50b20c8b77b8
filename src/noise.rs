// 该文件是 Qingshan （青山绿水） 项目的一部分。
// src/noise.rs - 置信度扰动源
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

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 单次扰动的幅度上限。
pub const JITTER_RANGE: f32 = 0.05;

/// 置信度扰动源。每次采样返回 [-JITTER_RANGE, JITTER_RANGE] 内的值。
pub trait ConfidenceJitter {
  fn sample(&mut self) -> f32;
}

/// 均匀分布扰动，可指定种子以复现结果。
pub struct UniformJitter {
  rng: ChaCha8Rng,
}

impl UniformJitter {
  pub fn from_entropy() -> Self {
    UniformJitter {
      rng: ChaCha8Rng::from_entropy(),
    }
  }

  pub fn from_seed(seed: u64) -> Self {
    UniformJitter {
      rng: ChaCha8Rng::seed_from_u64(seed),
    }
  }
}

impl ConfidenceJitter for UniformJitter {
  fn sample(&mut self) -> f32 {
    self.rng.gen_range(-JITTER_RANGE..=JITTER_RANGE)
  }
}

/// 不加扰动，用于需要完全确定性的场合。
pub struct NoJitter;

impl ConfidenceJitter for NoJitter {
  fn sample(&mut self) -> f32 {
    0.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uniform_jitter_stays_in_range() {
    let mut jitter = UniformJitter::from_seed(7);
    for _ in 0..1000 {
      let value = jitter.sample();
      assert!((-JITTER_RANGE..=JITTER_RANGE).contains(&value));
    }
  }

  #[test]
  fn same_seed_same_sequence() {
    let mut a = UniformJitter::from_seed(42);
    let mut b = UniformJitter::from_seed(42);
    for _ in 0..32 {
      assert_eq!(a.sample(), b.sample());
    }
  }

  #[test]
  fn no_jitter_is_zero() {
    let mut jitter = NoJitter;
    assert_eq!(jitter.sample(), 0.0);
  }
}
