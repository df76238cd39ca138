use serde::Serialize;
use std::collections::HashMap;

/// Job-position codes used by the 2024 Mahkamah Agung recap and their
/// published labels.
const STANDARD_POSITIONS: [(&str, &str); 14] = [
    ("apkaap", "ANALIS PENGELOLAAN KEUANGAN APBN AHLI PERTAMA"),
    ("app", "ANALIS PERKARA PERADILAN"),
    ("aap", "ARSIPARIS AHLI PERTAMA"),
    ("ap", "AUDITOR AHLI PERTAMA"),
    ("at", "AUDITOR TERAMPIL"),
    ("dgap", "DOKTER GIGI AHLI PERTAMA"),
    ("dh", "DOKUMENTALIS HUKUM"),
    ("pksti", "PENATA KELOLA SISTEM DAN TEKNOLOGI INFORMASI"),
    ("pk", "PENATA KEPROTOKOLAN"),
    ("ptpap", "PENGEMBANG TEKNOLOGI PEMBELAJARAN AHLI PERTAMA"),
    ("pt", "PERAWAT TERAMPIL"),
    ("tsp", "TEKNISI SARANA DAN PRASARANA"),
    ("tgmt", "TERAPIS GIGI DAN MULUT TERAMPIL"),
    ("wap", "WIDYAISWARA AHLI PERTAMA"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JabatanEntry {
    pub code: String,
    pub label: String,
}

/// Two-way lookup between job-position codes and their labels.
///
/// Values missing from either side resolve to themselves, so an unmapped code
/// is displayed as-is and an unknown label is searched for as a code.
#[derive(Debug, Clone, Default)]
pub struct JabatanDirectory {
    entries: Vec<JabatanEntry>,
    label_by_code: HashMap<String, usize>,
    code_by_label: HashMap<String, usize>,
}

impl JabatanDirectory {
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_POSITIONS)
    }

    /// Later pairs never replace an earlier mapping for the same code or label.
    pub fn from_pairs<I, C, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut directory = Self::default();
        for (code, label) in pairs {
            let code = code.into();
            let label = label.into();
            if directory.label_by_code.contains_key(&code)
                || directory.code_by_label.contains_key(&label)
            {
                continue;
            }

            let index = directory.entries.len();
            directory.label_by_code.insert(code.clone(), index);
            directory.code_by_label.insert(label.clone(), index);
            directory.entries.push(JabatanEntry { code, label });
        }
        directory
    }

    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.label_by_code
            .get(code)
            .map(|&index| self.entries[index].label.as_str())
            .unwrap_or(code)
    }

    pub fn code_for<'a>(&'a self, label: &'a str) -> &'a str {
        self.code_by_label
            .get(label)
            .map(|&index| self.entries[index].code.as_str())
            .unwrap_or(label)
    }

    pub fn entries(&self) -> &[JabatanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_directory_maps_both_directions() {
        let directory = JabatanDirectory::standard();
        assert_eq!(directory.len(), 14);
        assert_eq!(directory.label_for("app"), "ANALIS PERKARA PERADILAN");
        assert_eq!(directory.code_for("ANALIS PERKARA PERADILAN"), "app");

        for entry in directory.entries() {
            assert_eq!(directory.code_for(directory.label_for(&entry.code)), entry.code);
        }
    }

    #[test]
    fn unmapped_values_pass_through() {
        let directory = JabatanDirectory::standard();
        assert_eq!(directory.label_for("xyz"), "xyz");
        assert_eq!(directory.code_for("JURU SITA"), "JURU SITA");
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let directory = JabatanDirectory::standard();
        assert_eq!(directory.label_for("APP"), "APP");
        assert_eq!(
            directory.code_for("analis perkara peradilan"),
            "analis perkara peradilan"
        );
    }

    #[test]
    fn duplicate_pairs_keep_first_mapping() {
        let directory = JabatanDirectory::from_pairs([
            ("pk", "PENATA KEPROTOKOLAN"),
            ("pk", "PROTOKOL"),
            ("pk2", "PENATA KEPROTOKOLAN"),
        ]);
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.label_for("pk"), "PENATA KEPROTOKOLAN");
        assert_eq!(directory.label_for("pk2"), "pk2");
    }
}
