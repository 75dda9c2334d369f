//! API service modules for Septotrip endpoints.
//!
//! Each service covers one resource. They all follow the same shape:
//! dispatch through the client, map the statuses the endpoint is known to
//! return with a [`StatusMap`](crate::StatusMap), then validate the payload
//! against the output model.
//!
//! A 400 maps to `InvalidBodyError` on calls that carry a body and to
//! `NoIdProvidedError` on body-less calls keyed by an id; a 404 on any
//! id-keyed call maps to `InexistantResourceError`.

mod files;
mod logbooks;
mod spends;
mod steps;
mod todos;
mod trips;
mod users;

pub use files::FilesService;
pub use logbooks::LogbooksService;
pub use spends::SpendsService;
pub use steps::{DaysService, PathsService, PointsService, StepsService};
pub use todos::TodosService;
pub use trips::TripsService;
pub use users::UsersService;
