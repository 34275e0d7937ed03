//! Page behaviors as platform-neutral controllers. A front end forwards its
//! native events as the typed payloads in [`events`] and applies the returned
//! changes to its own element tree.

pub mod events;
pub mod highlight;
pub mod keynav;
pub mod portfolio;
