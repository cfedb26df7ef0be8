//! Seed bins for the Nairobi CBD pilot area.

use super::registry::BinRegistry;
use super::types::{Bin, BinStatus, RegistryError, WasteCategory};
use crate::geo::LatLng;

struct SeedBin {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    status: BinStatus,
    categories: &'static [WasteCategory],
    fill_level: u8,
    last_emptied: u64,
    address: &'static str,
}

const NAIROBI_BINS: &[SeedBin] = &[
    SeedBin {
        id: "bin-a01",
        name: "Kenyatta Avenue Clock",
        lat: -1.286389,
        lng: 36.817223,
        status: BinStatus::Available,
        categories: &[WasteCategory::Plastic],
        fill_level: 35,
        last_emptied: 1760490000,
        address: "Kenyatta Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a02",
        name: "Moi Avenue Clock",
        lat: -1.284722,
        lng: 36.824444,
        status: BinStatus::Full,
        categories: &[WasteCategory::Organic],
        fill_level: 96,
        last_emptied: 1760472000,
        address: "Moi Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a03",
        name: "Tom Mboya Clock",
        lat: -1.280278,
        lng: 36.8275,
        status: BinStatus::Maintenance,
        categories: &[WasteCategory::Metal],
        fill_level: 70,
        last_emptied: 1760454000,
        address: "Tom Mboya Street, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a04",
        name: "Kencom Clock",
        lat: -1.2845,
        lng: 36.8201,
        status: BinStatus::Available,
        categories: &[WasteCategory::EWaste],
        fill_level: 12,
        last_emptied: 1760436000,
        address: "Moi Avenue / Kenyatta Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a05",
        name: "Railways Bus Station",
        lat: -1.2921,
        lng: 36.8219,
        status: BinStatus::Full,
        categories: &[WasteCategory::Plastic, WasteCategory::Organic],
        fill_level: 88,
        last_emptied: 1760418000,
        address: "Haile Selassie Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a06",
        name: "City Market",
        lat: -1.2833,
        lng: 36.8219,
        status: BinStatus::Available,
        categories: &[WasteCategory::Organic, WasteCategory::Metal],
        fill_level: 48,
        last_emptied: 1760400000,
        address: "Muindi Mbingu Street, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a07",
        name: "Jeevanjee Gardens",
        lat: -1.2837,
        lng: 36.8197,
        status: BinStatus::Maintenance,
        categories: &[WasteCategory::Plastic, WasteCategory::EWaste],
        fill_level: 15,
        last_emptied: 1760382000,
        address: "Moktar Daddah Street, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a08",
        name: "Uhuru Park Entrance",
        lat: -1.2925,
        lng: 36.8167,
        status: BinStatus::Available,
        categories: &[WasteCategory::Organic, WasteCategory::Plastic],
        fill_level: 62,
        last_emptied: 1760364000,
        address: "Uhuru Highway, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a09",
        name: "Central Police Station",
        lat: -1.2841,
        lng: 36.8215,
        status: BinStatus::Full,
        categories: &[WasteCategory::Metal, WasteCategory::EWaste],
        fill_level: 100,
        last_emptied: 1760346000,
        address: "University Way, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a10",
        name: "National Archives",
        lat: -1.2845,
        lng: 36.8252,
        status: BinStatus::Available,
        categories: &[WasteCategory::Plastic, WasteCategory::Metal],
        fill_level: 20,
        last_emptied: 1760328000,
        address: "Moi Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a11",
        name: "Globe Roundabout",
        lat: -1.2775,
        lng: 36.8211,
        status: BinStatus::Maintenance,
        categories: &[WasteCategory::Organic, WasteCategory::EWaste],
        fill_level: 50,
        last_emptied: 1760310000,
        address: "Murang'a Road, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a12",
        name: "GPO",
        lat: -1.2861,
        lng: 36.8178,
        status: BinStatus::Available,
        categories: &[WasteCategory::Plastic, WasteCategory::Metal],
        fill_level: 55,
        last_emptied: 1760292000,
        address: "Kenyatta Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a13",
        name: "Nyayo House",
        lat: -1.2872,
        lng: 36.8194,
        status: BinStatus::Full,
        categories: &[WasteCategory::Organic, WasteCategory::Plastic],
        fill_level: 92,
        last_emptied: 1760274000,
        address: "Kenyatta Avenue / Uhuru Highway, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a14",
        name: "KICC",
        lat: -1.2889,
        lng: 36.8231,
        status: BinStatus::Available,
        categories: &[WasteCategory::EWaste, WasteCategory::Metal],
        fill_level: 8,
        last_emptied: 1760256000,
        address: "Harambee Avenue, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a15",
        name: "Hilton Hotel",
        lat: -1.2843,
        lng: 36.8235,
        status: BinStatus::Maintenance,
        categories: &[WasteCategory::Plastic, WasteCategory::Organic],
        fill_level: 40,
        last_emptied: 1760238000,
        address: "Mama Ngina Street, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a16",
        name: "Jamia Mosque",
        lat: -1.2832,
        lng: 36.8211,
        status: BinStatus::Available,
        categories: &[WasteCategory::Metal, WasteCategory::EWaste],
        fill_level: 41,
        last_emptied: 1760220000,
        address: "Banda Street, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a17",
        name: "Kenya National Theatre",
        lat: -1.2772,
        lng: 36.8131,
        status: BinStatus::Full,
        categories: &[WasteCategory::Organic, WasteCategory::Plastic],
        fill_level: 85,
        last_emptied: 1760202000,
        address: "Harry Thuku Road, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a18",
        name: "Nairobi Hospital",
        lat: -1.2986,
        lng: 36.8065,
        status: BinStatus::Available,
        categories: &[WasteCategory::Plastic, WasteCategory::EWaste],
        fill_level: 30,
        last_emptied: 1760184000,
        address: "Argwings Kodhek Road, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a19",
        name: "Nairobi Railway Museum",
        lat: -1.2926,
        lng: 36.8256,
        status: BinStatus::Maintenance,
        categories: &[WasteCategory::Metal, WasteCategory::Organic],
        fill_level: 77,
        last_emptied: 1760166000,
        address: "Station Road, Nairobi CBD",
    },
    SeedBin {
        id: "bin-a20",
        name: "Nairobi Gallery",
        lat: -1.2881,
        lng: 36.8197,
        status: BinStatus::Available,
        categories: &[WasteCategory::Plastic, WasteCategory::Metal],
        fill_level: 66,
        last_emptied: 1760148000,
        address: "Kenyatta Avenue / Uhuru Highway, Nairobi CBD",
    },
];

impl SeedBin {
    fn to_bin(&self) -> Bin {
        Bin::new(
            self.id,
            self.name,
            LatLng::new(self.lat, self.lng),
            self.status,
            self.categories.iter().copied(),
        )
        .with_fill_level(self.fill_level)
        .with_last_emptied(self.last_emptied)
        .with_address(self.address)
    }
}

impl BinRegistry {
    /// The 20 pilot bins around the Nairobi CBD.
    pub fn nairobi() -> Result<Self, RegistryError> {
        Self::new(NAIROBI_BINS.iter().map(SeedBin::to_bin).collect())
    }
}
