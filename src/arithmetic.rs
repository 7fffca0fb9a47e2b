//! Pure helpers behind `/api/add`

/// Sum of two signed 32-bit integers, wrapping on overflow
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// True for a missing value, the empty string, or whitespace only
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
