//! Hand-off between the query editor and the search coordinator.

mod coordination;
