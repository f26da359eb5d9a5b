use vs_core::charset::GlyphRamp;
use vs_core::error::CoreError;
use vs_core::frame::GrayFrame;

/// Hauteur de sortie dérivée de la largeur cible, du ratio source et de
/// la correction verticale :
/// `out_h = max(1, floor(out_w / (W/H) / height_scale))`.
///
/// # Example
/// ```
/// use vs_ascii::raster::out_height;
/// assert_eq!(out_height(160, 90, 100, 2.4), 23);
/// ```
#[must_use]
pub fn out_height(width: u32, height: u32, out_w: u16, height_scale: f32) -> u16 {
    let aspect = f64::from(width) / f64::from(height);
    let rows = (f64::from(out_w) / aspect / f64::from(height_scale)).floor();
    rows.max(1.0) as u16
}

/// Rastérise une frame décodée en un text frame : `out_h` lignes de
/// `out_w` caractères, jointes par `\n`, sans newline final.
///
/// Échantillonnage nearest-neighbor — chaque cellule de sortie prend la
/// valeur d'exactement un pixel source, sans moyenne. Suffisant aux
/// largeurs de terminal visées (80–120 colonnes) pour un coût par frame
/// minimal. Déterministe : frame et paramètres identiques produisent un
/// text frame identique au byte près.
///
/// # Errors
/// `CoreError::InvalidDimensions` si la frame a une dimension nulle,
/// `CoreError::InvalidTarget` si `out_w == 0` ou `height_scale <= 0`.
///
/// # Example
/// ```
/// use vs_ascii::raster::rasterize;
/// use vs_core::charset::GlyphRamp;
/// use vs_core::frame::GrayFrame;
///
/// let ramp = GlyphRamp::new(" .:-=+*#%@").unwrap();
/// let frame = GrayFrame::filled(8, 4, 255);
/// let text = rasterize(&frame, &ramp, 4, 1.0).unwrap();
/// assert_eq!(text, "@@@@\n@@@@");
/// ```
pub fn rasterize(
    frame: &GrayFrame,
    ramp: &GlyphRamp,
    out_w: u16,
    height_scale: f32,
) -> Result<String, CoreError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        });
    }
    if out_w == 0 || height_scale <= 0.0 {
        return Err(CoreError::InvalidTarget {
            out_w,
            height_scale,
        });
    }

    let out_h = out_height(frame.width, frame.height, out_w, height_scale);
    let mut text = String::with_capacity((usize::from(out_w) + 1) * usize::from(out_h));

    for cy in 0..out_h {
        if cy > 0 {
            text.push('\n');
        }
        for cx in 0..out_w {
            // Map cell coords to pixel coords (nearest-neighbor)
            let px = (u32::from(cx) * frame.width / u32::from(out_w)).min(frame.width - 1);
            let py = (u32::from(cy) * frame.height / u32::from(out_h)).min(frame.height - 1);
            text.push(ramp.map(frame.sample(px, py)));
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::charset::RAMP_COMPACT;

    fn ramp() -> GlyphRamp {
        GlyphRamp::new(RAMP_COMPACT).unwrap()
    }

    #[test]
    fn output_height_formula() {
        // 160/90 = 1.777… ; 100 / 1.777… / 2.4 = 23.4375 → 23
        assert_eq!(out_height(160, 90, 100, 2.4), 23);
        // Jamais en dessous d'une ligne
        assert_eq!(out_height(1920, 2, 10, 2.4), 1);
        assert_eq!(out_height(100, 100, 4, 1.0), 4);
    }

    #[test]
    fn grid_dimensions_match_contract() {
        let frame = GrayFrame::new(160, 90);
        let text = rasterize(&frame, &ramp(), 100, 2.4).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 23);
        assert!(lines.iter().all(|l| l.chars().count() == 100));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn uniform_frames_map_to_ramp_extremes() {
        let dark = GrayFrame::filled(8, 4, 0);
        let text = rasterize(&dark, &ramp(), 4, 1.0).unwrap();
        assert_eq!(text, "    \n    ");

        let bright = GrayFrame::filled(8, 4, 255);
        let text = rasterize(&bright, &ramp(), 4, 1.0).unwrap();
        assert_eq!(text, "@@@@\n@@@@");
    }

    #[test]
    fn deterministic_output() {
        let mut frame = GrayFrame::new(32, 18);
        for (i, px) in frame.data.iter_mut().enumerate() {
            *px = (i % 256) as u8;
        }
        let a = rasterize(&frame, &ramp(), 16, 2.0).unwrap();
        let b = rasterize(&frame, &ramp(), 16, 2.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn nearest_neighbor_picks_single_source_pixel() {
        // Moitié gauche noire, moitié droite blanche — aucune valeur
        // intermédiaire ne doit apparaître (pas de moyenne).
        let mut frame = GrayFrame::new(8, 2);
        for y in 0..2u32 {
            for x in 4..8u32 {
                frame.data[(y * 8 + x) as usize] = 255;
            }
        }
        let text = rasterize(&frame, &ramp(), 4, 0.5).unwrap();
        for line in text.split('\n') {
            assert_eq!(line, "  @@");
        }
    }

    #[test]
    fn rejects_empty_frame() {
        let frame = GrayFrame::new(0, 10);
        assert!(matches!(
            rasterize(&frame, &ramp(), 10, 2.4),
            Err(CoreError::InvalidDimensions { width: 0, .. })
        ));
        let frame = GrayFrame::new(10, 0);
        assert!(matches!(
            rasterize(&frame, &ramp(), 10, 2.4),
            Err(CoreError::InvalidDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn rejects_bad_target() {
        let frame = GrayFrame::new(10, 10);
        assert!(matches!(
            rasterize(&frame, &ramp(), 0, 2.4),
            Err(CoreError::InvalidTarget { out_w: 0, .. })
        ));
        assert!(matches!(
            rasterize(&frame, &ramp(), 10, 0.0),
            Err(CoreError::InvalidTarget { .. })
        ));
        assert!(matches!(
            rasterize(&frame, &ramp(), 10, -2.4),
            Err(CoreError::InvalidTarget { .. })
        ));
    }
}
