//! Identity types shared between the gateway and pilah services.

pub mod identity;
