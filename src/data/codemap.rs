//! Fixed code tables for the stunting survey.
//!
//! Four columns arrive as integer codes and are recoded into Indonesian
//! display labels; two more arrive pre-labelled and are only retyped.

// ---------------------------------------------------------------------------
// Column rename: raw spreadsheet header → display name
// ---------------------------------------------------------------------------

pub const RENAME_COLUMNS: &[(&str, &str)] = &[
    ("Provinsi", "Provinsi"),
    ("Jenis Kelamin", "Jenis Kelamin"),
    ("Mengetahui Ttg Stunting", "Pengetahuan Stunting"),
    ("Kepemilikan JKesehatan", "Jaminan Kesehatan"),
    ("Umur_Bulan", "Umur Bulan"),
    ("Lingkar_Kepala_Bayi", "Lingkar Kepala Bayi"),
    ("BB_Lahir", "Berat Lahir"),
    ("PB_Lahir", "Panjang Lahir"),
    ("PB_Saat_Ini", "Panjang Badan Sekarang"),
    ("Usia_Kehamilan", "Usia Kehamilan"),
    ("kategori_bl", "Kategori Berat Lahir"),
    ("kategori_Umur_Bulan", "Kategori Umur Bulan"),
];

// ---------------------------------------------------------------------------
// Code tables
// ---------------------------------------------------------------------------

/// BPS province codes.
pub const PROVINSI: &[(i64, &str)] = &[
    (11, "Aceh"),
    (12, "Sumatera Utara"),
    (13, "Sumatera Barat"),
    (14, "Riau"),
    (15, "Jambi"),
    (16, "Sumatera Selatan"),
    (17, "Bengkulu"),
    (18, "Lampung"),
    (19, "Bangka Belitung"),
    (21, "Kepulauan Riau"),
    (31, "DKI Jakarta"),
    (32, "Jawa Barat"),
    (33, "Jawa Tengah"),
    (34, "DI Yogyakarta"),
    (35, "Jawa Timur"),
    (36, "Banten"),
    (51, "Bali"),
    (52, "NTB"),
    (53, "NTT"),
    (61, "Kalimantan Barat"),
    (62, "Kalimantan Tengah"),
    (63, "Kalimantan Selatan"),
    (64, "Kalimantan Timur"),
    (65, "Kalimantan Utara"),
    (71, "Sulawesi Utara"),
    (72, "Sulawesi Tengah"),
    (73, "Sulawesi Selatan"),
    (74, "Sulawesi Tenggara"),
    (75, "Gorontalo"),
    (76, "Sulawesi Barat"),
    (81, "Maluku"),
    (82, "Maluku Utara"),
    (91, "Papua Barat"),
    (92, "Papua Barat Daya"),
    (94, "Papua"),
    (95, "Papua Selatan"),
    (96, "Papua Tengah"),
    (97, "Papua Pegunungan"),
];

pub const JENIS_KELAMIN: &[(i64, &str)] = &[(1, "Laki-laki"), (2, "Perempuan")];

pub const PENGETAHUAN_STUNTING: &[(i64, &str)] = &[(1, "Ya"), (2, "Tidak")];

/// Health-insurance ownership (JKN and combinations).
pub const JAMINAN_KESEHATAN: &[(i64, &str)] = &[
    (1, "BPJS PBI"),
    (2, "BPJS Non PBI"),
    (4, "Jamkesda"),
    (5, "BPJS PBI + Jamkesda"),
    (8, "Asuransi Swasta"),
    (10, "BPJS Non PBI + Asuransi Swasta"),
    (16, "Lainnya"),
    (32, "Tidak ada"),
    (99, "Kombinasi lain"),
];

/// Columns recoded through a code table, keyed by display name.
pub const CODE_MAPS: &[(&str, &[(i64, &str)])] = &[
    ("Provinsi", PROVINSI),
    ("Jenis Kelamin", JENIS_KELAMIN),
    ("Pengetahuan Stunting", PENGETAHUAN_STUNTING),
    ("Jaminan Kesehatan", JAMINAN_KESEHATAN),
];

/// Columns that arrive already labelled and are only retyped to categorical.
pub const PASS_THROUGH_CATEGORICAL: &[&str] = &["Kategori Berat Lahir", "Kategori Umur Bulan"];

/// Look up a label in one code table.
pub fn label_for(table: &[(i64, &'static str)], code: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(label_for(JENIS_KELAMIN, 1), Some("Laki-laki"));
        assert_eq!(label_for(PROVINSI, 34), Some("DI Yogyakarta"));
        assert_eq!(label_for(JAMINAN_KESEHATAN, 32), Some("Tidak ada"));
    }

    #[test]
    fn unknown_code_is_absent() {
        assert_eq!(label_for(JENIS_KELAMIN, 3), None);
        assert_eq!(label_for(PROVINSI, 20), None);
    }

    #[test]
    fn code_tables_have_unique_codes() {
        for (name, table) in CODE_MAPS {
            for (i, (code, _)) in table.iter().enumerate() {
                assert!(
                    !table[i + 1..].iter().any(|(c, _)| c == code),
                    "duplicate code {code} in {name}"
                );
            }
        }
    }
}
