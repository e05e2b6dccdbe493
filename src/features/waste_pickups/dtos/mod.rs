mod waste_pickup_dto;

pub use waste_pickup_dto::{
    CreateWastePickupDto, ListWastePickupsQuery, PickupAddressDto, UpdateWastePickupDto,
    WastePickupResponseDto,
};
