use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// A syntax feature that may have to be rewritten for older environments.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
  Arrow,
  AsyncAwait,
  AsyncGenerator,
  #[serde(rename = "bigint")]
  BigInt,
  Class,
  ClassField,
  ClassPrivateAccessor,
  ClassPrivateBrandCheck,
  ClassPrivateField,
  ClassPrivateMethod,
  ClassPrivateStaticAccessor,
  ClassPrivateStaticField,
  ClassPrivateStaticMethod,
  ClassStaticBlocks,
  ClassStaticField,
  ConstAndLet,
  Decorators,
  DefaultArgument,
  Destructuring,
  ExponentOperator,
  ExportStarAs,
  ForAwait,
  ForOf,
  Generator,
  LogicalAssignment,
  NullishCoalescing,
  ObjectRestSpread,
  OptionalCatchBinding,
  OptionalChain,
  RestArgument,
  TemplateLiteral,
  TopLevelAwait,
}

impl Feature {
  pub const ALL: [Feature; 32] = [
    Feature::Arrow,
    Feature::AsyncAwait,
    Feature::AsyncGenerator,
    Feature::BigInt,
    Feature::Class,
    Feature::ClassField,
    Feature::ClassPrivateAccessor,
    Feature::ClassPrivateBrandCheck,
    Feature::ClassPrivateField,
    Feature::ClassPrivateMethod,
    Feature::ClassPrivateStaticAccessor,
    Feature::ClassPrivateStaticField,
    Feature::ClassPrivateStaticMethod,
    Feature::ClassStaticBlocks,
    Feature::ClassStaticField,
    Feature::ConstAndLet,
    Feature::Decorators,
    Feature::DefaultArgument,
    Feature::Destructuring,
    Feature::ExponentOperator,
    Feature::ExportStarAs,
    Feature::ForAwait,
    Feature::ForOf,
    Feature::Generator,
    Feature::LogicalAssignment,
    Feature::NullishCoalescing,
    Feature::ObjectRestSpread,
    Feature::OptionalCatchBinding,
    Feature::OptionalChain,
    Feature::RestArgument,
    Feature::TemplateLiteral,
    Feature::TopLevelAwait,
  ];

  #[rustfmt::skip]
  pub fn name(self) -> &'static str {
    match self {
      Feature::Arrow => "arrow",
      Feature::AsyncAwait => "async-await",
      Feature::AsyncGenerator => "async-generator",
      Feature::BigInt => "bigint",
      Feature::Class => "class",
      Feature::ClassField => "class-field",
      Feature::ClassPrivateAccessor => "class-private-accessor",
      Feature::ClassPrivateBrandCheck => "class-private-brand-check",
      Feature::ClassPrivateField => "class-private-field",
      Feature::ClassPrivateMethod => "class-private-method",
      Feature::ClassPrivateStaticAccessor => "class-private-static-accessor",
      Feature::ClassPrivateStaticField => "class-private-static-field",
      Feature::ClassPrivateStaticMethod => "class-private-static-method",
      Feature::ClassStaticBlocks => "class-static-blocks",
      Feature::ClassStaticField => "class-static-field",
      Feature::ConstAndLet => "const-and-let",
      Feature::Decorators => "decorators",
      Feature::DefaultArgument => "default-argument",
      Feature::Destructuring => "destructuring",
      Feature::ExponentOperator => "exponent-operator",
      Feature::ExportStarAs => "export-star-as",
      Feature::ForAwait => "for-await",
      Feature::ForOf => "for-of",
      Feature::Generator => "generator",
      Feature::LogicalAssignment => "logical-assignment",
      Feature::NullishCoalescing => "nullish-coalescing",
      Feature::ObjectRestSpread => "object-rest-spread",
      Feature::OptionalCatchBinding => "optional-catch-binding",
      Feature::OptionalChain => "optional-chain",
      Feature::RestArgument => "rest-argument",
      Feature::TemplateLiteral => "template-literal",
      Feature::TopLevelAwait => "top-level-await",
    }
  }

  /// The first edition with native support.
  #[rustfmt::skip]
  pub fn introduced_in(self) -> EsVersion {
    use Feature::*;
    match self {
      Arrow | Class | ConstAndLet | DefaultArgument | Destructuring | ForOf | Generator
      | RestArgument | TemplateLiteral => EsVersion::Es2015,
      ExponentOperator => EsVersion::Es2016,
      AsyncAwait => EsVersion::Es2017,
      AsyncGenerator | ForAwait | ObjectRestSpread => EsVersion::Es2018,
      OptionalCatchBinding => EsVersion::Es2019,
      BigInt | ExportStarAs | NullishCoalescing | OptionalChain => EsVersion::Es2020,
      LogicalAssignment => EsVersion::Es2021,
      ClassField | ClassPrivateAccessor | ClassPrivateBrandCheck | ClassPrivateField
      | ClassPrivateMethod | ClassPrivateStaticAccessor | ClassPrivateStaticField
      | ClassPrivateStaticMethod | ClassStaticBlocks | ClassStaticField
      | TopLevelAwait => EsVersion::Es2022,
      Decorators => EsVersion::EsNext,
    }
  }
}

impl Display for Feature {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetParseError {
  UnknownVersion(String),
  UnknownFeature(String),
}

impl Display for TargetParseError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TargetParseError::UnknownVersion(v) => write!(
        f,
        "unknown target {v:?}; expected es5, es6, es2015 to es2022, or esnext"
      ),
      TargetParseError::UnknownFeature(v) => write!(f, "unknown feature {v:?}"),
    }
  }
}

impl Error for TargetParseError {}

impl FromStr for Feature {
  type Err = TargetParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Feature::ALL
      .into_iter()
      .find(|f| f.name() == s)
      .ok_or_else(|| TargetParseError::UnknownFeature(s.to_string()))
  }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsVersion {
  Es5,
  #[serde(alias = "es6")]
  Es2015,
  Es2016,
  Es2017,
  Es2018,
  Es2019,
  Es2020,
  Es2021,
  Es2022,
  EsNext,
}

impl EsVersion {
  pub fn name(self) -> &'static str {
    match self {
      EsVersion::Es5 => "es5",
      EsVersion::Es2015 => "es2015",
      EsVersion::Es2016 => "es2016",
      EsVersion::Es2017 => "es2017",
      EsVersion::Es2018 => "es2018",
      EsVersion::Es2019 => "es2019",
      EsVersion::Es2020 => "es2020",
      EsVersion::Es2021 => "es2021",
      EsVersion::Es2022 => "es2022",
      EsVersion::EsNext => "esnext",
    }
  }
}

impl Display for EsVersion {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for EsVersion {
  type Err = TargetParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let lower = s.to_ascii_lowercase();
    let digits = lower.strip_prefix("es").unwrap_or(&lower);
    Ok(match digits {
      "5" => EsVersion::Es5,
      "6" | "2015" => EsVersion::Es2015,
      "7" | "2016" => EsVersion::Es2016,
      "8" | "2017" => EsVersion::Es2017,
      "9" | "2018" => EsVersion::Es2018,
      "10" | "2019" => EsVersion::Es2019,
      "11" | "2020" => EsVersion::Es2020,
      "12" | "2021" => EsVersion::Es2021,
      "13" | "2022" => EsVersion::Es2022,
      "next" => EsVersion::EsNext,
      _ => return Err(TargetParseError::UnknownVersion(s.to_string())),
    })
  }
}

/// The environment the output must run in: an edition plus per-feature overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
  pub version: EsVersion,
  #[serde(rename = "unsupported")]
  pub forced_unsupported: BTreeSet<Feature>,
  #[serde(rename = "supported")]
  pub forced_supported: BTreeSet<Feature>,
}

impl Target {
  pub fn es(version: EsVersion) -> Target {
    Target {
      version,
      forced_unsupported: BTreeSet::new(),
      forced_supported: BTreeSet::new(),
    }
  }

  pub fn esnext() -> Target {
    Target::es(EsVersion::EsNext)
  }

  pub fn with_unsupported(mut self, features: impl IntoIterator<Item = Feature>) -> Target {
    self.forced_unsupported.extend(features);
    self
  }

  pub fn with_supported(mut self, features: impl IntoIterator<Item = Feature>) -> Target {
    self.forced_supported.extend(features);
    self
  }

  pub fn supports(&self, feature: Feature) -> bool {
    supports(feature, self)
  }
}

impl Default for Target {
  fn default() -> Self {
    Target::esnext()
  }
}

impl Display for Target {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.version)?;
    for feature in self.forced_unsupported.iter() {
      write!(f, " -{feature}")?;
    }
    for feature in self.forced_supported.iter() {
      write!(f, " +{feature}")?;
    }
    Ok(())
  }
}

/// Whether `target` runs `feature` natively. Forced-unsupported features win over forced-supported
/// ones, and both win over the edition.
pub fn supports(feature: Feature, target: &Target) -> bool {
  if target.forced_unsupported.contains(&feature) {
    return false;
  };
  if target.forced_supported.contains(&feature) {
    return true;
  };
  target.version >= feature.introduced_in()
}

#[cfg(test)]
mod tests {
  use super::EsVersion;
  use super::Feature;
  use super::Target;
  use super::TargetParseError;

  #[test]
  fn test_parse_versions() {
    assert_eq!("es5".parse(), Ok(EsVersion::Es5));
    assert_eq!("es6".parse(), Ok(EsVersion::Es2015));
    assert_eq!("ES2019".parse(), Ok(EsVersion::Es2019));
    assert_eq!("2020".parse(), Ok(EsVersion::Es2020));
    assert_eq!("esnext".parse(), Ok(EsVersion::EsNext));
    assert_eq!(
      "es1999".parse::<EsVersion>(),
      Err(TargetParseError::UnknownVersion("es1999".to_string()))
    );
  }

  #[test]
  fn test_feature_names_round_trip() {
    for feature in Feature::ALL {
      assert_eq!(feature.name().parse(), Ok(feature));
      let json = serde_json::to_string(&feature).unwrap();
      assert_eq!(json, format!("\"{}\"", feature.name()));
    }
    assert!("optional-chaining".parse::<Feature>().is_err());
  }

  #[test]
  fn test_edition_table() {
    let es2019 = Target::es(EsVersion::Es2019);
    assert!(es2019.supports(Feature::OptionalCatchBinding));
    assert!(es2019.supports(Feature::AsyncGenerator));
    assert!(!es2019.supports(Feature::OptionalChain));
    assert!(!es2019.supports(Feature::NullishCoalescing));
    assert!(!Target::es(EsVersion::Es2021).supports(Feature::ClassStaticBlocks));
    assert!(Target::es(EsVersion::Es2022).supports(Feature::ClassPrivateField));
    assert!(!Target::es(EsVersion::Es2022).supports(Feature::Decorators));
    assert!(Target::esnext().supports(Feature::Decorators));
    assert!(!Target::es(EsVersion::Es5).supports(Feature::Arrow));
  }

  #[test]
  fn test_overrides() {
    let target = Target::esnext().with_unsupported([Feature::OptionalChain]);
    assert!(!target.supports(Feature::OptionalChain));
    assert!(target.supports(Feature::NullishCoalescing));
    let target = Target::es(EsVersion::Es5).with_supported([Feature::Arrow]);
    assert!(target.supports(Feature::Arrow));
    let both = target.with_unsupported([Feature::Arrow]);
    assert!(!both.supports(Feature::Arrow));
  }

  #[test]
  fn test_deserialize_target() {
    let target: Target = serde_json::from_str(
      r#"{"version": "es2019", "unsupported": ["class-field"], "supported": ["optional-chain"]}"#,
    )
    .unwrap();
    assert_eq!(target.version, EsVersion::Es2019);
    assert!(!target.supports(Feature::ClassField));
    assert!(target.supports(Feature::OptionalChain));
    let target: Target = serde_json::from_str(r#"{"version": "es6"}"#).unwrap();
    assert_eq!(target, Target::es(EsVersion::Es2015));
    let target: Target = serde_json::from_str("{}").unwrap();
    assert_eq!(target, Target::esnext());
    assert_eq!(
      Target::es(EsVersion::Es2020)
        .with_unsupported([Feature::BigInt])
        .to_string(),
      "es2020 -bigint"
    );
  }
}
