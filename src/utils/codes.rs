//! Generación de códigos de registro
//!
//! Códigos cortos legibles para órdenes y vehículos ("ALQ-0042",
//! "VEH-0917"). La unicidad la garantiza el repositorio que los emite.

use rand::Rng;

/// Generar un código con prefijo y sufijo de 4 dígitos
pub fn generate_code(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{}-{:04}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_format() {
        let code = generate_code("ALQ");
        assert!(code.starts_with("ALQ-"));
        assert_eq!(code.len(), 8);
        assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
    }
}
