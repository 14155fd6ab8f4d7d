//! Maintainable asset registry.
//!
//! Reference data ported from the production PM tables. The `detail` work
//! instructions are configuration text, not logic — they are reproduced
//! byte-for-byte (including the leading newline and quirky spacing)
//! because they flow verbatim into the individual messages.

use serde::{Deserialize, Serialize};

/// A physical asset under preventive maintenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    /// Unique id, referenced by the rotation table.
    pub id: u32,
    /// Display label. NOT unique — several assets share a building name.
    pub name: String,
    /// Short label of the maintenance activity.
    pub description: String,
    /// Multi-line free-text work instructions.
    pub detail: String,
}

/// Immutable registry of assets, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

/// Shared checklist for the generic common buildings.
const COMMON_BUILDING_DETAIL: &str = "
1. Persiapan peralatan dan mobilisasi
2. Periksa, dan perbaikan/pembersihan atap dak beton
3. Periksa, dan perbaikan/pengecatan dinding
4. Periksa, dan perbaikan/pengecatan plafon
5. Periksa, dan perbaikan lantai keramik
6. Periksa dan perbaikan sanitasi area
7. Periksa dan perbaikan electrical (lampu, stop kontak, instalasi listiklainnya)
8. Periksa dan perbaikan aksesoris gedung";

/// Shared checklist for building-structure maintenance.
const STRUCTURE_DETAIL: &str = "
1. Periksa, dan perbaikan/pengecatan wallpaper dinding
2. Periksa, dan perbaikan/pengecatan plafon
3. Periksa, dan perbaikan/pengecatan cladding
4. Periksa, dan perbaikan lantai keramik
5. Periksa, dan perbaikan aksesoris dinding
6. Periksa kondisi handrail";

/// Shared checklist for river maintenance.
const RIVER_DETAIL: &str = "
1. Persiapan peralatan dan mobilisa
2. Periksa lantai beton
3. Periksa dan perbaikan turap sungai
4. Periksa kondisi bak kontrol";

/// Shared checklist for KTI water-pipe maintenance.
const KTI_PIPE_DETAIL: &str = "
1. Persiapan peralatan dan mobilisa
2. Periksa danperbaikan kondisi pipa air KTI
3. Periksa dan perbaikan keran air dan flow meter
4. Periksa/perbaikan flow meter dan catat meter air";

impl AssetCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// The production PM asset roster (32 assets).
    pub fn builtin() -> Self {
        let assets = vec![
            asset(
                1,
                "Gedung Administrasi",
                "Pemeliharaan atap gedung ADB",
                "
1. Periksa, dan perbaikan/pembersihan atap dak beton
2. Periksa, dan perbaikan/pembersihan atap zincalume
3. Periksa, dan perbaikan/pembersihan talang air
4. Periksa, dan perbaikan simpul dak beton",
            ),
            asset(
                2,
                "Gedung Administrasi",
                "Pemeliharaan struktur gedung ADB",
                STRUCTURE_DETAIL,
            ),
            asset(
                3,
                "Gedung Administrasi",
                "Pemeliharaan Sanitasi Gedung ADB",
                "
1. Persiapan peralatan dan mobilisasi
2. Pengetesan dan perbaikan Urinoir, wastafel, closet, jet shower, shower.
3. Periksa dan pembersihan floor drain.
4. Periksa Pompa dan pelampung penampungan air",
            ),
            asset(
                4,
                "Gedung Administrasi",
                "Pemeliharaan electrical gedung ADB",
                "
1. Persiapan peralatan dan mobilisasi
2. Periksa dan perbaikan penggantian lampu
3. Periksa dan perbaikan peratalatan elektronik
4. Periksa dan perbaikan stop kontak dan MCB
5. Periksa dan perbaikan exhaus",
            ),
            asset(
                5,
                "Masjid nurkahrohah",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                6,
                "Pos 3 dan gate",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                7,
                "Pos 3 Outfall",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                8,
                "Pos Tebing",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                9,
                "Pos 2",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                10,
                "Pos 1 dan gate",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                11,
                "Pos Ecopark",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                12,
                "Lapangan Tennis",
                "Pemeliharaan common building non KR",
                "
1. Persiapan peralatan dan mobilisasi
2. Periksa, dan perbaikan/pembersihan lapangan
3. Periksa, dan perbaikan/pengecatan garis lapangan
4. Periksa, dan perbaikan/pengecatan pagar
5. Periksa, dan perbaikan lantai lapangan
6. Periksa dan perbaikan sanitasi area
7. Periksa dan perbaikan electrical (lampu, stop kontak, instalasi listrik lainnya)
8. Periksa dan perbaikan aksesoris lapangan",
            ),
            asset(
                13,
                "Dapur Umum",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                14,
                "Rumah Pompa Gerem",
                "Pemeliharaan common building non KR",
                STRUCTURE_DETAIL,
            ),
            asset(
                15,
                "Pos rumah pompa gerem",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                16,
                "Gudang Fasau",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                17,
                "Rumah Bijak Sampah",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                18,
                "Pos GPP",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                19,
                "Lapangan Olah raga Ecopark",
                "Pemeliharaan common building non KR",
                "
1. Persiapan peralatan dan mobilisasi
2. Periksa lantai beton area olah raga
3. Periksa dan perbaikan aksesoris lapanga olah raga",
            ),
            asset(
                20,
                "Saung Ecopark",
                "Pemeliharaan common building non KR",
                "
1. Persiapan peralatan dan mobilisasi
2. Periksa dan perbaikan dudukan saung
3. Periksa dan perbaikan atap jerami
4. Periksa dan perbaikan ikatan tulangan saung",
            ),
            asset(
                21,
                "Relling dan pagar Ecopark",
                "Pemeliharaan common building non KR",
                "
1. Persiapan peralatan dan mobilisa
2. Periksa dan perbaikan pondasi reiling pagar
3. Periksa dan perbaikan pengecatan pagar",
            ),
            asset(
                22,
                "Pintu Air Ecopark",
                "Pemeliharaan common building non KR",
                "
1. Persiapan peralatan dan mobilisa
2. Periksa struktur pintu air
3. periksa dan hand valve pelumasan pintu air",
            ),
            asset(
                23,
                "Tempat parkir dan musholla ecopark",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                24,
                "Rumah Pompa Lebak gede",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                25,
                "Mess lebak gede",
                "Pemeliharaan common building non KR",
                COMMON_BUILDING_DETAIL,
            ),
            asset(26, "Sungai ADB", "Pemeliharaan Sungai ADB", RIVER_DETAIL),
            asset(27, "Sungai Ecopark", "Pemeliharaan Sungai Ecopark", RIVER_DETAIL),
            asset(
                28,
                "Saluran air KTI Ecopark",
                "Pemeliharaan Pipa KTI Ecopark",
                KTI_PIPE_DETAIL,
            ),
            asset(
                29,
                "Saluran Air KTI Lebak Gede",
                "Pemeliharaan Pipa KTI Lebak Gede",
                KTI_PIPE_DETAIL,
            ),
            asset(
                30,
                "Pos Keamanan",
                "Pemeliharaan Pos Keamanan",
                COMMON_BUILDING_DETAIL,
            ),
            asset(
                31,
                "Gedung Administrasi",
                "Pemeliharaan Furniture Ruangan Gedung ADB",
                "
1. Periksa, dan perbaikan/meja kursi
2. Periksa, dan perbaikan/pengecatan lemari
3. Periksa, dan perbaikan rak buku
4. Periksa, dan perbaikan sofa dan kursi tamu
5. Periksa, dan perbaikan meja rapat
6. Periksa, dan perbaikan aksesoris ruangan",
            ),
            asset(
                32,
                "Meteran Air KTI",
                "Pemeliharaan Meter Air KTI",
                "
1. Persiapan peralatan dan mobilisasi
2. Periksa dan catat (foto) Meter KTI
3. Periksa dan perbaikan Meteran KTI
4. Periksa dan perbaikan flow meter
5. Periksa dan catat kebocoran
6. Input Meter KTI database
7. Cetak tagihan KTI",
            ),
        ];
        Self::new(assets)
    }

    pub fn get(&self, id: u32) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }
}

fn asset(id: u32, name: &str, description: &str, detail: &str) -> Asset {
    Asset {
        id,
        name: name.to_string(),
        description: description.to_string(),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_assets_with_unique_ids() {
        let catalog = AssetCatalog::builtin();
        assert_eq!(catalog.len(), 32);
        let mut ids: Vec<u32> = catalog.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn test_names_are_not_unique() {
        let catalog = AssetCatalog::builtin();
        let adb_count = catalog
            .iter()
            .filter(|a| a.name == "Gedung Administrasi")
            .count();
        assert!(adb_count > 1);
    }

    #[test]
    fn test_details_keep_leading_newline() {
        let catalog = AssetCatalog::builtin();
        for a in catalog.iter() {
            assert!(a.detail.starts_with('\n'), "asset {} detail", a.id);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = AssetCatalog::builtin();
        assert_eq!(catalog.get(6).unwrap().name, "Pos 3 dan gate");
        assert_eq!(
            catalog.get(1).unwrap().description,
            "Pemeliharaan atap gedung ADB"
        );
        assert!(catalog.get(33).is_none());
        assert!(catalog.get(0).is_none());
    }
}
