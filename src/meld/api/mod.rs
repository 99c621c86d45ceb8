pub mod meld_maven_api;

pub use meld_maven_api::MeldMavenApi;
