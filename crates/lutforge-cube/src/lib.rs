//! # lutforge-cube
//!
//! `.cube` 3D LUT serialization and identity analysis.
//!
//! The `.cube` format is a simple text-based LUT format widely supported
//! by DaVinci Resolve, Adobe applications, and many other tools.
//!
//! # Format
//!
//! ```text
//! # LUTForge generated 3D LUT
//! # 33x33x33, domain [0,1]
//! LUT_3D_SIZE 33
//!
//! 0.000000 0.000000 0.000000
//! ...
//! 1.000000 1.000000 1.000000
//! ```
//!
//! Data lines carry three 6-decimal values and iterate with **red as
//! the outer axis, green in the middle, blue innermost** (blue varies
//! fastest). That nesting order is this format's interchange contract
//! and matches [`LutGrid`]'s memory layout, so encoding is a single
//! linear walk.
//!
//! # Example
//!
//! ```rust
//! use lutforge_core::LutGrid;
//! use lutforge_cube::{analyze, encode};
//!
//! let text = encode(&LutGrid::identity(33)).unwrap();
//! let report = analyze(&text).unwrap();
//! assert_eq!(report.size, 33);
//! assert_eq!(report.transformed_voxels, 0);
//! ```
//!
//! # Dependencies
//!
//! - [`lutforge-core`] - Grid type
//! - [`thiserror`] - Error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub use error::{CubeError, CubeResult};

use lutforge_core::LutGrid;
use std::fmt::Write as _;
use std::io::Write;

/// Deviation beyond this marks a voxel as transformed away from identity.
pub const IDENTITY_TOLERANCE: f32 = 0.01;

/// Encodes a grid as `.cube` text.
///
/// Preconditions: every value finite and in `[0, 1]`, data length equal
/// to `size^3`. Violations are an [`CubeError`]; nothing is emitted for
/// an invalid grid, so output is never truncated or partial.
pub fn encode(grid: &LutGrid) -> CubeResult<String> {
    validate(grid)?;

    let mut out = String::with_capacity(grid.entry_count() * 27 + 64);
    out.push_str("# LUTForge generated 3D LUT\n");
    let _ = writeln!(
        out,
        "# {n}x{n}x{n}, domain [0,1]",
        n = grid.size
    );
    let _ = writeln!(out, "LUT_3D_SIZE {}", grid.size);
    out.push('\n');

    // Data is red-major with blue fastest, which is exactly the file's
    // line order.
    for rgb in &grid.data {
        let _ = writeln!(out, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2]);
    }

    Ok(out)
}

/// Encodes a grid and writes it to `writer`.
///
/// The text is fully assembled before any byte is written.
pub fn write_cube<W: Write>(writer: &mut W, grid: &LutGrid) -> CubeResult<()> {
    let text = encode(grid)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Report from the identity analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeReport {
    /// Declared `LUT_3D_SIZE`.
    pub size: usize,
    /// Voxels deviating from identity beyond [`IDENTITY_TOLERANCE`].
    pub transformed_voxels: usize,
    /// Maximum per-channel deviation observed.
    pub max_deviation: f32,
}

impl CubeReport {
    /// True if no voxel deviates beyond tolerance.
    pub fn is_identity(&self) -> bool {
        self.transformed_voxels == 0
    }
}

/// Analyzes encoded `.cube` text against the identity LUT.
///
/// For every data line, the expected identity value is recomputed from
/// the line index (`r = i / N^2`, `g = (i / N) % N`, `b = i % N`, each
/// divided by `N - 1`) and compared against the stored values. Used as
/// a regression/no-op detector, not for round-tripping into a grid.
pub fn analyze(text: &str) -> CubeResult<CubeReport> {
    let mut size: Option<usize> = None;
    let mut transformed = 0usize;
    let mut max_deviation = 0.0f32;
    let mut index = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("TITLE") {
            continue;
        }
        if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
            let n: usize = rest
                .trim()
                .parse()
                .map_err(|_| CubeError::Parse("invalid LUT_3D_SIZE value".into()))?;
            if n < 2 {
                return Err(CubeError::InvalidSize(format!("size {n} is below 2")));
            }
            size = Some(n);
            continue;
        }
        if line.starts_with("DOMAIN_MIN") || line.starts_with("DOMAIN_MAX") {
            continue;
        }

        let n = size.ok_or_else(|| CubeError::Parse("data before LUT_3D_SIZE".into()))?;
        let rgb = parse_rgb(line)?;

        let scale = 1.0 / (n - 1) as f32;
        let expected = [
            (index / (n * n)) as f32 * scale,
            ((index / n) % n) as f32 * scale,
            (index % n) as f32 * scale,
        ];

        let mut voxel_dev = 0.0f32;
        for c in 0..3 {
            voxel_dev = voxel_dev.max((rgb[c] - expected[c]).abs());
        }
        if voxel_dev > IDENTITY_TOLERANCE {
            transformed += 1;
        }
        max_deviation = max_deviation.max(voxel_dev);
        index += 1;
    }

    let size = size.ok_or_else(|| CubeError::Parse("missing LUT_3D_SIZE".into()))?;
    let expected_lines = size * size * size;
    if index != expected_lines {
        return Err(CubeError::Parse(format!(
            "expected {expected_lines} data lines for size {size}, found {index}"
        )));
    }

    Ok(CubeReport {
        size,
        transformed_voxels: transformed,
        max_deviation,
    })
}

fn validate(grid: &LutGrid) -> CubeResult<()> {
    let expected = grid.size * grid.size * grid.size;
    if grid.size < 2 || grid.data.len() != expected {
        return Err(CubeError::InvalidSize(format!(
            "expected {} entries for size {}, got {}",
            expected,
            grid.size,
            grid.data.len()
        )));
    }
    for (i, rgb) in grid.data.iter().enumerate() {
        for &v in rgb {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(CubeError::ValueOutOfRange { index: i, value: v });
            }
        }
    }
    Ok(())
}

fn parse_rgb(line: &str) -> CubeResult<[f32; 3]> {
    let mut parts = line.split_whitespace();
    let mut rgb = [0.0f32; 3];
    for (c, slot) in rgb.iter_mut().enumerate() {
        let part = parts
            .next()
            .ok_or_else(|| CubeError::Parse(format!("short RGB line: {line}")))?;
        *slot = part
            .parse()
            .map_err(|_| CubeError::Parse(format!("invalid channel {c}: {part}")))?;
    }
    Ok(rgb)
}
