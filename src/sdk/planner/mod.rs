pub mod adapters;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod headless;
pub mod presets;
pub mod session;
pub mod waypoint;

pub use adapters::{Adapters, MapView, MarkerAdapter, PresentationState, ResultsPresenter, SearchDisplay};
pub use coordinator::{PlannerSnapshot, Request, RequestToken, RouteCoordinator, RouteState};
pub use error::PlannerError;
pub use events::{PlannerEvent, SearchEvent};
pub use headless::HeadlessSurface;
pub use presets::PresetPoint;
pub use session::PlannerSession;
pub use waypoint::{parse_coord, Role, WaypointStore};
