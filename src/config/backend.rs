//! Storage backends and their capability sets.
//!
//! `Impl::Host` keeps vectors in main memory and handles every dtype.
//! `Impl::Device` stands for an accelerator implementation of `F^n`: it
//! has no complex support, and is only available when the crate is built
//! with the `device` feature. Callers that want to skip device work check
//! [`Impl::is_available`] once up front.

use std::sync::OnceLock;

use bitflags::bitflags;
use log::warn;

use crate::core::dtype::DType;
use crate::error::{FnError, Result};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BackendCaps: u32 {
        const BOOL     = 0b0001;
        const INTEGER  = 0b0010;
        const REAL     = 0b0100;
        const COMPLEX  = 0b1000;
        const ALL_REAL = Self::BOOL.bits() | Self::INTEGER.bits() | Self::REAL.bits();
    }
}

impl BackendCaps {
    /// Capability a backend needs to store `dtype`.
    pub fn required_for(dtype: DType) -> BackendCaps {
        if dtype.is_bool() {
            BackendCaps::BOOL
        } else if dtype.is_int() {
            BackendCaps::INTEGER
        } else if dtype.is_complex_floating() {
            BackendCaps::COMPLEX
        } else {
            BackendCaps::REAL
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Impl {
    #[default]
    Host,
    Device,
}

static DEVICE_AVAILABLE: OnceLock<bool> = OnceLock::new();

impl Impl {
    pub fn from_name(name: &str) -> Result<Impl> {
        match name.to_ascii_lowercase().as_str() {
            "host" | "cpu" => Ok(Impl::Host),
            "device" | "cuda" | "gpu" => Ok(Impl::Device),
            other => Err(FnError::Value(format!("unknown backend {other:?}"))),
        }
    }

    pub fn caps(self) -> BackendCaps {
        match self {
            Impl::Host => BackendCaps::all(),
            Impl::Device => BackendCaps::ALL_REAL,
        }
    }

    pub fn supports(self, dtype: DType) -> bool {
        self.caps().contains(BackendCaps::required_for(dtype))
    }

    /// Whether spaces can be created on this backend in this build.
    /// The device check runs once per process.
    pub fn is_available(self) -> bool {
        match self {
            Impl::Host => true,
            Impl::Device => *DEVICE_AVAILABLE.get_or_init(|| {
                let available = cfg!(feature = "device");
                if !available {
                    warn!("device backend not available in this build");
                }
                available
            }),
        }
    }

    /// Fail with `NotImplemented` if `dtype` cannot be stored here.
    pub fn check(self, dtype: DType) -> Result<()> {
        if !self.supports(dtype) {
            return Err(FnError::NotImplemented(format!(
                "{dtype} vectors on the {self:?} backend"
            )));
        }
        if !self.is_available() {
            return Err(FnError::NotImplemented(format!("{self:?} backend is unavailable")));
        }
        Ok(())
    }
}
