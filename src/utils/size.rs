const UNIT: u64 = 1024;
const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Formats a byte count with binary prefixes, e.g. `1536` → `"1.5 KiB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    // floor(log1024(bytes)) without floating point drift at exact powers
    let mut exp = 0usize;
    let mut remaining = bytes;
    while remaining >= UNIT && exp < PREFIXES.len() {
        remaining /= UNIT;
        exp += 1;
    }

    let value = bytes as f64 / (UNIT as f64).powi(exp as i32);
    format!("{:.1} {}iB", value, PREFIXES[exp - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes_below_one_kib() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1), "1 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn binary_prefixes() {
        assert_eq!(format_file_size(1024), "1.0 KiB");
        assert_eq!(format_file_size(1536), "1.5 KiB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MiB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }

    #[test]
    fn just_below_next_unit_stays_in_lower_unit() {
        assert_eq!(format_file_size(1024 * 1024 - 1), "1024.0 KiB");
    }

    #[test]
    fn largest_values_use_exbibytes() {
        assert_eq!(format_file_size(u64::MAX), "16.0 EiB");
    }
}
