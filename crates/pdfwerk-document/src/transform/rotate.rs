// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotate — turn all, odd, or even pages, keeping every page in place.

use pdfwerk_core::error::Result;
use pdfwerk_core::types::{Rotation, RotationScope};
use tracing::{info, instrument};

use crate::pdf::{DocumentHandle, PageWriter};

/// Copy every page of `handle`, adding `rotation` to the pages whose 1-based
/// position falls in `scope`. Other pages keep their existing orientation.
#[instrument(skip(handle), fields(pages = handle.page_count()))]
pub fn rotate(handle: &DocumentHandle, rotation: Rotation, scope: RotationScope) -> Result<Vec<u8>> {
    info!("Rotating PDF");

    let mut writer = PageWriter::new();
    let mut rotated = 0usize;
    for page in handle.pages() {
        if scope.applies_to(page.number()) {
            writer.append_rotated(page, rotation)?;
            rotated += 1;
        } else {
            writer.append_page(page)?;
        }
    }
    let bytes = writer.finish()?;

    info!(rotated, "Rotation complete");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page_label, rotations, sample_pdf, sample_pdf_with_inherited_rotation};

    #[test]
    fn rotates_only_scoped_pages() {
        let handle = DocumentHandle::open(&sample_pdf(4)).unwrap();
        let bytes = rotate(&handle, Rotation::CLOCKWISE_90, RotationScope::Odd).unwrap();
        assert_eq!(rotations(&bytes), vec![90, 0, 90, 0]);

        let out = DocumentHandle::open(&bytes).unwrap();
        assert_eq!(page_label(&out, 3), "Page 4");
    }

    #[test]
    fn even_scope_and_full_scope() {
        let handle = DocumentHandle::open(&sample_pdf(3)).unwrap();
        let even = rotate(&handle, Rotation::HALF_TURN, RotationScope::Even).unwrap();
        assert_eq!(rotations(&even), vec![0, 180, 0]);

        let all = rotate(&handle, Rotation::CLOCKWISE_270, RotationScope::All).unwrap();
        assert_eq!(rotations(&all), vec![270, 270, 270]);
    }

    #[test]
    fn rotation_composes_with_existing_value() {
        let handle = DocumentHandle::open(&sample_pdf_with_inherited_rotation(2, 180)).unwrap();
        let bytes = rotate(&handle, Rotation::CLOCKWISE_270, RotationScope::Odd).unwrap();
        assert_eq!(rotations(&bytes), vec![90, 180]);
    }

    #[test]
    fn out_of_range_existing_rotation_is_normalised() {
        let handle =
            DocumentHandle::open(&sample_pdf_with_inherited_rotation(2, i64::MAX)).unwrap();
        let bytes = rotate(&handle, Rotation::CLOCKWISE_90, RotationScope::All).unwrap();
        assert_eq!(rotations(&bytes), vec![90, 90]);

        let skewed = DocumentHandle::open(&sample_pdf_with_inherited_rotation(1, 45)).unwrap();
        let bytes = rotate(&skewed, Rotation::CLOCKWISE_90, RotationScope::All).unwrap();
        assert_eq!(rotations(&bytes), vec![90]);
    }

    #[test]
    fn zero_rotation_is_a_faithful_copy() {
        let handle = DocumentHandle::open(&sample_pdf(2)).unwrap();
        let bytes = rotate(&handle, Rotation::NONE, RotationScope::All).unwrap();
        assert_eq!(rotations(&bytes), vec![0, 0]);
    }
}
