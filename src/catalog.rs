//! The fixed catalog of map assets built in one run.

/// One entry in the map catalog.
///
/// Test entries live under `test_maps/` and keep deliberately tiny land
/// masses: small-island removal is skipped for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEntry {
    pub name: &'static str,
    pub is_test: bool,
}

impl MapEntry {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            is_test: false,
        }
    }

    pub const fn test(name: &'static str) -> Self {
        Self {
            name,
            is_test: true,
        }
    }

    /// Directory category this entry is read from and written to.
    pub const fn category(&self) -> &'static str {
        if self.is_test { "test_maps" } else { "maps" }
    }
}

/// Every map shipped with the game, production maps first, test fixtures
/// last. Names are assumed unique within their category; a stale entry
/// surfaces later as a load failure, not here.
pub const DEFAULT_CATALOG: &[MapEntry] = &[
    MapEntry::new("africa"),
    MapEntry::new("asia"),
    MapEntry::new("world"),
    MapEntry::new("giantworldmap"),
    MapEntry::new("blacksea"),
    MapEntry::new("europe"),
    MapEntry::new("europeclassic"),
    MapEntry::new("mars"),
    MapEntry::new("mena"),
    MapEntry::new("oceania"),
    MapEntry::new("northamerica"),
    MapEntry::new("southamerica"),
    MapEntry::new("britannia"),
    MapEntry::new("gatewaytotheatlantic"),
    MapEntry::new("australia"),
    MapEntry::new("pangaea"),
    MapEntry::new("iceland"),
    MapEntry::new("betweentwoseas"),
    MapEntry::new("eastasia"),
    MapEntry::new("faroeislands"),
    MapEntry::new("deglaciatedantarctica"),
    MapEntry::new("falklandislands"),
    MapEntry::new("baikal"),
    MapEntry::new("halkidiki"),
    MapEntry::test("big_plains"),
    MapEntry::test("half_land_half_ocean"),
    MapEntry::test("ocean_and_land"),
    MapEntry::test("plains"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selection() {
        assert_eq!(MapEntry::new("africa").category(), "maps");
        assert_eq!(MapEntry::test("plains").category(), "test_maps");
    }

    #[test]
    fn test_default_catalog_split() {
        let test_count = DEFAULT_CATALOG.iter().filter(|e| e.is_test).count();
        assert_eq!(DEFAULT_CATALOG.len(), 28);
        assert_eq!(test_count, 4);
        // Test fixtures are grouped at the tail of the catalog
        assert!(
            DEFAULT_CATALOG
                .iter()
                .skip(DEFAULT_CATALOG.len() - test_count)
                .all(|e| e.is_test)
        );
    }

    #[test]
    fn test_names_unique_within_category() {
        // Not enforced at runtime; this guards the static data itself.
        for (i, a) in DEFAULT_CATALOG.iter().enumerate() {
            for b in &DEFAULT_CATALOG[i + 1..] {
                assert!(
                    a.name != b.name || a.is_test != b.is_test,
                    "duplicate catalog entry: {}",
                    a.name
                );
            }
        }
    }
}
