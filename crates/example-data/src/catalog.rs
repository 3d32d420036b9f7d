//! Built-in catalogues the generator draws from.

/// Office equipment the organisation typically receives at headquarters.
pub const ASSET_CATALOG: &[&str] = &[
    "Laptop",
    "Desktop Tower",
    "Monitor",
    "Projector",
    "Network Switch",
    "Wireless Router",
    "Barcode Scanner",
    "Label Printer",
    "Laser Printer",
    "UPS Unit",
    "Desk Phone",
    "Conference Camera",
    "External Hard Drive",
    "Tablet",
];

/// Branch offices assets are dispatched to.
pub const BRANCHES: &[&str] = &[
    "Nairobi",
    "Mombasa",
    "Kisumu",
    "Nakuru",
    "Eldoret",
    "Thika",
    "Machakos",
    "Nyeri",
];
