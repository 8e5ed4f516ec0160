/// Importe con exactamente dos decimales
pub fn format_price(amount: f64) -> String {
    // -0.00 no debe llegar a la UI
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Recorta descripciones largas para las cards del carrito
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_always_have_two_decimals() {
        assert_eq!(format_price(25.0), "25.00");
        assert_eq!(format_price(5.5), "5.50");
        assert_eq!(format_price(0.1 + 0.2), "0.30");
        assert_eq!(format_price(-0.0), "0.00");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate("ñandú feliz", 5), "ñandú...");
    }
}
