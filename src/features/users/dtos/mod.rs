mod user_dto;

pub use user_dto::{ListCollectorsQuery, UpdateProfileDto, UserResponseDto};
