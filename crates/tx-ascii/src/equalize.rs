use tx_core::frame::LumaBuffer;

/// Égalise l'histogramme d'un buffer de luminance, en place.
///
/// Remap par CDF : après transformation, la distribution cumulée est
/// approximativement uniforme sur [0, 255]. Un buffer à intensité
/// constante ressort inchangé (pas de division par zéro).
///
/// # Example
/// ```
/// use tx_ascii::equalize::equalize_in_place;
/// use tx_core::frame::LumaBuffer;
///
/// let mut luma = LumaBuffer::new(2, 1);
/// luma.data = vec![100, 200];
/// equalize_in_place(&mut luma);
/// assert_eq!(luma.data, vec![0, 255]);
/// ```
pub fn equalize_in_place(luma: &mut LumaBuffer) {
    let total = luma.data.len();
    if total == 0 {
        return;
    }

    let mut hist = [0usize; 256];
    for &v in &luma.data {
        hist[v as usize] += 1;
    }

    let mut cdf = [0usize; 256];
    let mut running = 0usize;
    for (v, count) in hist.iter().enumerate() {
        running += count;
        cdf[v] = running;
    }

    // Smallest non-zero CDF value — the occupied bin with the lowest
    // intensity. total == cdf_min means a single occupied bin: constant
    // image, identity remap.
    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(total);
    if total == cdf_min {
        return;
    }

    let mut lut = [0u8; 256];
    let span = total - cdf_min;
    for (v, slot) in lut.iter_mut().enumerate() {
        *slot = ((cdf[v].saturating_sub(cdf_min)) * 255 / span) as u8;
    }

    for v in &mut luma.data {
        *v = lut[*v as usize];
    }
}

/// Complémente chaque échantillon (255 − v), en place.
///
/// Appliqué après l'égalisation quand l'inversion est demandée — l'ordre
/// du pipeline est : resize → grayscale → equalize → invert.
///
/// # Example
/// ```
/// use tx_ascii::equalize::invert_in_place;
/// use tx_core::frame::LumaBuffer;
///
/// let mut luma = LumaBuffer::new(2, 1);
/// luma.data = vec![0, 255];
/// invert_in_place(&mut luma);
/// assert_eq!(luma.data, vec![255, 0]);
/// ```
pub fn invert_in_place(luma: &mut LumaBuffer) {
    for v in &mut luma.data {
        *v = 255 - *v;
    }
}
