use bon::Builder;
use serde::{Deserialize, Serialize};

use super::Gender;

/// A (subject, relation, object) triple with labels resolved for one language.
///
/// # Example
///
/// ```
/// use mlama::{Fact, Gender};
///
/// let fact = Fact::builder()
///     .relation_id("P19")
///     .sub_uri("Q7186")
///     .sub_label("Marie Curie")
///     .sub_gender(Gender::Female)
///     .obj_uri("Q270")
///     .obj_label("Warsaw")
///     .build();
///
/// assert_eq!(fact.obj_gender, Gender::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Fact {
    pub uuid: Option<String>,
    pub relation_id: String,
    pub sub_uri: String,
    pub sub_label: String,
    #[builder(default)]
    pub sub_gender: Gender,
    pub obj_uri: String,
    pub obj_label: String,
    #[builder(default)]
    pub obj_gender: Gender,
}
