//! Some generic test helpers functions.
