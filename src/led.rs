//! Touchring mode LED status file.
//!
//! The wacom driver exposes the ring's mode LED as a sysfs attribute
//! holding one ASCII digit. Its location moved when the driver became a HID
//! driver in Linux 3.17:
//!
//! - older kernels: `/sys/bus/usb/devices/*/wacom_led/status_led0_select`
//! - newer kernels: `/sys/bus/hid/devices/*/wacom_led/status_led0_select`
//!
//! The pattern matching the running kernel is tried first, then the other.
//! Reading and writing are not locked: two overlapping invocations can both
//! read the same mode and write the same successor.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::config::MAX_MODES;
use crate::error::{Result, TouchringError};

/// LED attribute under a USB interface (pre-3.17 kernels).
pub const USB_LED_PATTERN: &str = "sys/bus/usb/devices/*/wacom_led/status_led0_select";

/// LED attribute under a HID device (3.17 and later).
pub const HID_LED_PATTERN: &str = "sys/bus/hid/devices/*/wacom_led/status_led0_select";

/// First kernel with the HID sysfs layout.
pub const HID_LAYOUT_SINCE: KernelVersion = KernelVersion { major: 3, minor: 17 };

/// Major and minor version of a Linux kernel release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KernelVersion {
    pub major: u32,
    pub minor: u32,
}

impl KernelVersion {
    /// Parse a release string such as `6.8.0-45-generic`.
    pub fn parse(release: &str) -> Option<Self> {
        let mut parts = release.trim().split(|c: char| !c.is_ascii_digit());
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        Some(Self { major, minor })
    }

    /// Read the running kernel's release from procfs under `root`.
    pub fn detect(root: &Path) -> Option<Self> {
        let path = root.join("proc/sys/kernel/osrelease");
        let release = fs::read_to_string(&path)
            .map_err(|e| debug!(path = %path.display(), error = %e, "Kernel release unavailable"))
            .ok()?;
        let version = Self::parse(&release);
        debug!(release = %release.trim(), ?version, "Detected kernel");
        version
    }
}

/// Finds the LED status file in sysfs.
#[derive(Debug, Clone)]
pub struct LedLocator {
    root: PathBuf,
    kernel: Option<KernelVersion>,
}

impl LedLocator {
    /// Locator for the live system.
    #[must_use]
    pub fn system() -> Self {
        Self::at_root("/")
    }

    /// Locator over a filesystem root whose procfs names the kernel.
    #[must_use]
    pub fn at_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let kernel = KernelVersion::detect(&root);
        Self { root, kernel }
    }

    /// Locator over an arbitrary filesystem root (used by tests).
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>, kernel: Option<KernelVersion>) -> Self {
        Self {
            root: root.into(),
            kernel,
        }
    }

    /// Candidate patterns, most likely first.
    ///
    /// An unknown kernel is assumed to use the current layout.
    pub fn candidate_patterns(&self) -> [PathBuf; 2] {
        let hid_first = self.kernel.is_none_or(|k| k >= HID_LAYOUT_SINCE);
        let (first, second) = if hid_first {
            (HID_LED_PATTERN, USB_LED_PATTERN)
        } else {
            (USB_LED_PATTERN, HID_LED_PATTERN)
        };
        [self.root.join(first), self.root.join(second)]
    }

    /// Locate the LED status file.
    ///
    /// # Errors
    ///
    /// Returns [`TouchringError::LedFileNotFound`] if no pattern matches an
    /// existing file.
    #[instrument(skip(self), fields(root = %self.root.display(), kernel = ?self.kernel))]
    pub fn locate(&self) -> Result<PathBuf> {
        let patterns = self.candidate_patterns();
        for pattern in &patterns {
            if let Some(path) = expand_pattern(pattern).into_iter().next() {
                debug!(path = %path.display(), "Found LED status file");
                return Ok(path);
            }
            trace!(pattern = %pattern.display(), "No match");
        }

        Err(TouchringError::LedFileNotFound {
            patterns: patterns.iter().map(|p| p.display().to_string()).collect(),
        })
    }
}

/// Expand a path containing one `*` component into existing files.
///
/// The directory before the wildcard is listed and the remainder of the
/// pattern is appended to every entry. Matches are returned sorted.
pub fn expand_pattern(pattern: &Path) -> Vec<PathBuf> {
    let mut base = PathBuf::new();
    let mut components = pattern.components();
    let mut found_wildcard = false;
    for component in components.by_ref() {
        if component.as_os_str() == "*" {
            found_wildcard = true;
            break;
        }
        base.push(component);
    }

    if !found_wildcard {
        return if pattern.is_file() {
            vec![pattern.to_path_buf()]
        } else {
            Vec::new()
        };
    }
    let rest: PathBuf = components.collect();

    let Ok(entries) = fs::read_dir(&base) else {
        trace!(base = %base.display(), "Wildcard base not listable");
        return Vec::new();
    };

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path().join(&rest))
        .filter(|candidate| candidate.is_file())
        .collect();
    matches.sort();
    matches
}

/// The LED status file holding the current mode index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedFile {
    path: PathBuf,
}

impl LedFile {
    /// Use an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the file in sysfs.
    pub fn locate(locator: &LedLocator) -> Result<Self> {
        locator.locate().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored mode.
    ///
    /// Only the first character is read; it is reduced modulo
    /// [`MAX_MODES`] to tolerate stray values.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or read, or if its first character
    /// is not a decimal digit.
    pub fn read_mode(&self) -> Result<usize> {
        let read_err = |source| TouchringError::LedFileRead {
            path: self.path.clone(),
            source,
        };

        let mut file = File::open(&self.path).map_err(read_err)?;
        let mut byte = [0u8; 1];
        let n = file.read(&mut byte).map_err(read_err)?;

        let digit = (n == 1)
            .then(|| char::from(byte[0]).to_digit(10))
            .flatten()
            .ok_or_else(|| TouchringError::LedFileParse {
                path: self.path.clone(),
                content: String::from_utf8_lossy(&byte[..n]).into_owned(),
            })?;

        let mode = digit as usize % MAX_MODES;
        debug!(path = %self.path.display(), raw = digit, mode, "Read LED mode");
        Ok(mode)
    }

    /// Overwrite the stored mode with a single ASCII digit.
    ///
    /// This is what switches the LED.
    pub fn write_mode(&self, mode: usize) -> Result<()> {
        fs::write(&self.path, mode.to_string()).map_err(|source| TouchringError::LedFileWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), mode, "Wrote LED mode");
        Ok(())
    }
}
