use crate::error::Result;
use crate::value::Value;

pub trait Generator {
    /// Renders `data` as the generator's target format.
    ///
    /// `source_name` is the original file name; presentation formats use it as a title.
    fn generate(&self, data: &Value, source_name: &str) -> Result<String>;
}
