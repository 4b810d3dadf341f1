pub mod startup;

pub use self::startup::Application;
