// Static site shell
pub mod fragments;
pub mod navigation;

pub use fragments::{load_shared_fragments, FragmentSlot, Page, SHARED_FRAGMENTS};
pub use navigation::{NavigationController, PageElements, HOME_PAGE};
