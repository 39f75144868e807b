//! Ports - interfaces to external collaborators.

mod reasoner;

pub use reasoner::{
    InputField, Reasoner, ReasonerError, ReasonerInfo, ReasonerRequest, ReasonerStep,
};
