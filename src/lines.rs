//! Static registry of the monitored São Paulo rail lines.
//!
//! Loaded once at startup; read-only afterwards. Lookups are by the short
//! numeric id printed on the network map ("2", "15", ...).

/// Organization responsible for running a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Metro,
    ViaQuatro,
    ViaMobilidade,
    Cptm,
}

impl Operator {
    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Metro => "Metrô",
            Operator::ViaQuatro => "ViaQuatro",
            Operator::ViaMobilidade => "ViaMobilidade",
            Operator::Cptm => "CPTM",
        }
    }
}

/// Immutable metadata for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub operator: Operator,
    /// Alternative names the status page is known to use.
    pub aliases: &'static [&'static str],
}

impl LineInfo {
    /// Name variants to search for, in match priority order: the exact
    /// display name, hyphen replaced by a space, hyphen spelled " - ",
    /// the prefix before the hyphen, then per-line aliases.
    pub fn name_variants(&self) -> Vec<String> {
        let mut variants = vec![self.display_name.to_string()];
        if self.display_name.contains('-') {
            variants.push(self.display_name.replace('-', " "));
            variants.push(self.display_name.replace('-', " - "));
            if let Some(prefix) = self.display_name.split('-').next() {
                variants.push(prefix.trim_end().to_string());
            }
        }
        variants.extend(self.aliases.iter().map(|a| a.to_string()));
        variants
    }
}

const LINES: &[LineInfo] = &[
    LineInfo {
        id: "1",
        display_name: "Linha 1-Azul",
        operator: Operator::Metro,
        aliases: &[],
    },
    LineInfo {
        id: "2",
        display_name: "Linha 2-Verde",
        operator: Operator::Metro,
        aliases: &[],
    },
    LineInfo {
        id: "3",
        display_name: "Linha 3-Vermelha",
        operator: Operator::Metro,
        aliases: &[],
    },
    LineInfo {
        id: "4",
        display_name: "Linha 4-Amarela",
        operator: Operator::ViaQuatro,
        aliases: &[],
    },
    LineInfo {
        id: "5",
        display_name: "Linha 5-Lilás",
        operator: Operator::ViaMobilidade,
        aliases: &[],
    },
    LineInfo {
        id: "7",
        display_name: "Linha 7-Rubi",
        operator: Operator::Cptm,
        aliases: &[],
    },
    LineInfo {
        id: "8",
        display_name: "Linha 8-Diamante",
        operator: Operator::ViaMobilidade,
        aliases: &[],
    },
    LineInfo {
        id: "9",
        display_name: "Linha 9-Esmeralda",
        operator: Operator::ViaMobilidade,
        aliases: &[],
    },
    LineInfo {
        id: "10",
        display_name: "Linha 10-Turquesa",
        operator: Operator::Cptm,
        aliases: &[],
    },
    LineInfo {
        id: "11",
        display_name: "Linha 11-Coral",
        operator: Operator::Cptm,
        aliases: &["Expresso Leste"],
    },
    LineInfo {
        id: "12",
        display_name: "Linha 12-Safira",
        operator: Operator::Cptm,
        aliases: &[],
    },
    LineInfo {
        id: "13",
        display_name: "Linha 13-Jade",
        operator: Operator::Cptm,
        aliases: &[],
    },
    LineInfo {
        id: "15",
        display_name: "Linha 15-Prata",
        operator: Operator::Metro,
        aliases: &["Monotrilho"],
    },
];

/// All registered lines, in network order.
pub fn all() -> &'static [LineInfo] {
    LINES
}

/// Look up a line by its short id.
pub fn find(id: &str) -> Option<&'static LineInfo> {
    LINES.iter().find(|line| line.id == id)
}

/// Ids of every registered line.
pub fn all_ids() -> Vec<String> {
    LINES.iter().map(|line| line.id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_known_line() {
        let line = find("2").unwrap();
        assert_eq!(line.display_name, "Linha 2-Verde");
        assert_eq!(line.operator, Operator::Metro);
    }

    #[test]
    fn test_find_unknown_line() {
        assert!(find("99").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = LINES.iter().map(|line| line.id).collect();
        assert_eq!(ids.len(), LINES.len());
    }

    #[test]
    fn test_name_variants_priority_order() {
        let variants = find("2").unwrap().name_variants();
        assert_eq!(
            variants,
            vec![
                "Linha 2-Verde".to_string(),
                "Linha 2 Verde".to_string(),
                "Linha 2 - Verde".to_string(),
                "Linha 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_name_variants_include_aliases_last() {
        let variants = find("15").unwrap().name_variants();
        assert_eq!(variants.first().unwrap(), "Linha 15-Prata");
        assert_eq!(variants.last().unwrap(), "Monotrilho");
    }

    #[test]
    fn test_all_ids_match_table_order() {
        assert_eq!(all_ids().first().unwrap(), "1");
        assert_eq!(all_ids().last().unwrap(), "15");
        assert_eq!(all_ids().len(), all().len());
    }
}
