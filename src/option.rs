use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use winnow::ascii::multispace0;
use winnow::combinator::{delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{Error, Result};

/// A value in an option's enumerated domain.
///
/// `true`/`false` (any case) are recognised as booleans; anything else is
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionValue {
    /// A boolean value.
    Bool(bool),
    /// A free-form enumerated value.
    Text(String),
}

/// Recognise `true`/`false` in any case.
fn as_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl FromStr for OptionValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidOption("empty option value".to_string()));
        }
        match as_bool(s) {
            Some(b) => Ok(OptionValue::Bool(b)),
            None => Ok(OptionValue::Text(s.to_string())),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionValue::Bool(true) => f.write_str("true"),
            OptionValue::Bool(false) => f.write_str("false"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

/// A declared configuration switch with an enumerated domain and a default.
///
/// The textual form is `name[v1 v2 ...]=default`; a bare `name=default`
/// declares the boolean domain `[true false]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
    /// Option name (e.g. `shared`, `fPIC`).
    pub name: String,
    /// The values the option may take.
    pub domain: Vec<OptionValue>,
    /// Default value; always a member of the domain.
    pub default: OptionValue,
}

impl OptionDecl {
    /// Declare a boolean option.
    pub fn boolean(name: &str, default: bool) -> OptionDecl {
        OptionDecl {
            name: name.to_string(),
            domain: vec![OptionValue::Bool(true), OptionValue::Bool(false)],
            default: OptionValue::Bool(default),
        }
    }

    /// Parse a space-separated list of option declarations.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_metadata::{OptionDecl, OptionValue};
    ///
    /// let decls = OptionDecl::parse_line("shared=false fPIC=false").unwrap();
    /// assert_eq!(decls.len(), 2);
    /// assert_eq!(decls[0].name, "shared");
    /// assert_eq!(decls[0].default, OptionValue::Bool(false));
    /// ```
    pub fn parse_line(input: &str) -> Result<Vec<OptionDecl>> {
        let decls: Vec<OptionDecl> = parse_decl_line()
            .parse(input)
            .map_err(|e| Error::InvalidOption(format!("{e}")))?;
        for decl in &decls {
            if !decl.domain.contains(&decl.default) {
                return Err(Error::InvalidOption(format!(
                    "default '{}' not in domain of '{}'",
                    decl.default, decl.name
                )));
            }
        }
        Ok(decls)
    }

    fn has_boolean_domain(&self) -> bool {
        self.domain == [OptionValue::Bool(true), OptionValue::Bool(false)]
    }
}

impl fmt::Display for OptionDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.has_boolean_domain() {
            write!(f, "{}={}", self.name, self.default)
        } else {
            write!(f, "{}[", self.name)?;
            for (i, value) in self.domain.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
            write!(f, "]={}", self.default)
        }
    }
}

/// Removes an option from the effective set when another option has a given
/// value.
///
/// The canonical rule is "`shared=true` removes `fPIC`": position-independent
/// code is implied for shared builds, so the flag is meaningless there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    /// Option whose value triggers the rule.
    pub trigger: String,
    /// Value that activates the rule.
    pub when: OptionValue,
    /// Option removed from the effective set.
    pub removes: String,
}

impl ExclusionRule {
    /// The standard rule set: `shared=true` removes `fPIC`.
    pub fn defaults() -> Vec<ExclusionRule> {
        vec![ExclusionRule {
            trigger: "shared".to_string(),
            when: OptionValue::Bool(true),
            removes: "fPIC".to_string(),
        }]
    }
}

/// Apply exclusion rules to an option map, returning the effective map.
///
/// Total and deterministic: defined for every input map, and applying the
/// same rules twice yields the same result as applying them once.
pub fn apply_rules(
    mut options: BTreeMap<String, OptionValue>,
    rules: &[ExclusionRule],
) -> BTreeMap<String, OptionValue> {
    for rule in rules {
        if options.get(&rule.trigger) == Some(&rule.when) {
            options.remove(&rule.removes);
        }
    }
    options
}

/// The configured option set of a recipe: declarations plus any explicit
/// overrides requested for this build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionSet {
    decls: BTreeMap<String, OptionDecl>,
    overrides: BTreeMap<String, OptionValue>,
}

impl OptionSet {
    /// Build an option set from declarations.
    ///
    /// Duplicate names are rejected.
    pub fn from_decls(decls: Vec<OptionDecl>) -> Result<OptionSet> {
        let mut map = BTreeMap::new();
        for decl in decls {
            if map.contains_key(&decl.name) {
                return Err(Error::InvalidOption(format!(
                    "duplicate option: {}",
                    decl.name
                )));
            }
            map.insert(decl.name.clone(), decl);
        }
        Ok(OptionSet {
            decls: map,
            overrides: BTreeMap::new(),
        })
    }

    /// Whether any options are declared.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// The declarations, in name order.
    pub fn decls(&self) -> impl Iterator<Item = &OptionDecl> {
        self.decls.values()
    }

    /// Override an option for this build.
    ///
    /// The option must be declared and the value must be in its domain.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<()> {
        let decl = self
            .decls
            .get(name)
            .ok_or_else(|| Error::InvalidOption(format!("unknown option: {name}")))?;
        if !decl.domain.contains(&value) {
            return Err(Error::InvalidOption(format!(
                "value '{value}' not in domain of '{name}'"
            )));
        }
        self.overrides.insert(name.to_string(), value);
        Ok(())
    }

    /// The current value of an option: the override if set, otherwise the
    /// declared default.
    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.overrides
            .get(name)
            .or_else(|| self.decls.get(name).map(|d| &d.default))
    }

    /// Resolve the effective option map after applying exclusion rules.
    pub fn effective(&self, rules: &[ExclusionRule]) -> BTreeMap<String, OptionValue> {
        let requested: BTreeMap<String, OptionValue> = self
            .decls
            .iter()
            .map(|(name, decl)| {
                let value = self
                    .overrides
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| decl.default.clone());
                (name.clone(), value)
            })
            .collect();
        apply_rules(requested, rules)
    }
}

// Winnow parsers

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

fn parse_value(input: &mut &str) -> ModalResult<OptionValue> {
    take_while(1.., is_value_char)
        .map(|s: &str| match as_bool(s) {
            Some(b) => OptionValue::Bool(b),
            None => OptionValue::Text(s.to_string()),
        })
        .parse_next(input)
}

fn parse_domain(input: &mut &str) -> ModalResult<Vec<OptionValue>> {
    delimited(
        '[',
        repeat(1.., preceded(multispace0, parse_value)),
        (multispace0, ']'),
    )
    .parse_next(input)
}

fn parse_decl(input: &mut &str) -> ModalResult<OptionDecl> {
    let name: String = take_while(1.., is_name_char)
        .map(|s: &str| s.to_string())
        .parse_next(input)?;
    let domain = opt(parse_domain).parse_next(input)?;
    '='.parse_next(input)?;
    let default = parse_value.parse_next(input)?;
    Ok(OptionDecl {
        name,
        domain: domain
            .unwrap_or_else(|| vec![OptionValue::Bool(true), OptionValue::Bool(false)]),
        default,
    })
}

fn parse_decl_line<'s>() -> impl Parser<&'s str, Vec<OptionDecl>, ErrMode<ContextError>> {
    move |input: &mut &'s str| {
        let decls = repeat(0.., preceded(multispace0, parse_decl)).parse_next(input)?;
        multispace0.parse_next(input)?;
        Ok(decls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_fpic() -> OptionSet {
        OptionSet::from_decls(vec![
            OptionDecl::boolean("shared", false),
            OptionDecl::boolean("fPIC", false),
        ])
        .unwrap()
    }

    #[test]
    fn parse_value_kinds() {
        assert_eq!("true".parse::<OptionValue>().unwrap(), OptionValue::Bool(true));
        assert_eq!("False".parse::<OptionValue>().unwrap(), OptionValue::Bool(false));
        assert_eq!(
            "openssl".parse::<OptionValue>().unwrap(),
            OptionValue::Text("openssl".to_string())
        );
        assert!("".parse::<OptionValue>().is_err());
    }

    #[test]
    fn parse_value_booleans_any_case() {
        for s in ["true", "True", "TRUE", "tRuE"] {
            assert_eq!(s.parse::<OptionValue>().unwrap(), OptionValue::Bool(true));
        }
        for s in ["false", "False", "FALSE"] {
            assert_eq!(s.parse::<OptionValue>().unwrap(), OptionValue::Bool(false));
        }

        // The line parser recognises the same spellings, so an uppercased
        // default stays inside the boolean shorthand domain.
        let decls = OptionDecl::parse_line("shared=TRUE").unwrap();
        assert_eq!(decls[0].default, OptionValue::Bool(true));
    }

    #[test]
    fn parse_boolean_shorthand() {
        let decls = OptionDecl::parse_line("shared=false fPIC=false").unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "shared");
        assert_eq!(
            decls[0].domain,
            vec![OptionValue::Bool(true), OptionValue::Bool(false)]
        );
        assert_eq!(decls[1].name, "fPIC");
        assert_eq!(decls[1].default, OptionValue::Bool(false));
    }

    #[test]
    fn parse_explicit_domain() {
        let decls = OptionDecl::parse_line("ssl[openssl gnutls none]=openssl").unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].domain.len(), 3);
        assert_eq!(decls[0].default, OptionValue::Text("openssl".to_string()));
    }

    #[test]
    fn parse_empty_line() {
        assert!(OptionDecl::parse_line("").unwrap().is_empty());
    }

    #[test]
    fn default_outside_domain() {
        let err = OptionDecl::parse_line("ssl[openssl gnutls]=none").unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn display_round_trip() {
        for line in ["shared=false", "fPIC=true", "ssl[openssl gnutls none]=gnutls"] {
            let decls = OptionDecl::parse_line(line).unwrap();
            assert_eq!(decls[0].to_string(), line);
        }
    }

    #[test]
    fn set_unknown_option() {
        let mut opts = shared_fpic();
        let err = opts.set("static", OptionValue::Bool(true)).unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn set_out_of_domain() {
        let mut opts = shared_fpic();
        let err = opts
            .set("shared", OptionValue::Text("maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn value_prefers_override() {
        let mut opts = shared_fpic();
        assert_eq!(opts.value("shared"), Some(&OptionValue::Bool(false)));
        opts.set("shared", OptionValue::Bool(true)).unwrap();
        assert_eq!(opts.value("shared"), Some(&OptionValue::Bool(true)));
        assert_eq!(opts.value("static"), None);
    }

    #[test]
    fn defaults_kept_when_shared_off() {
        let opts = shared_fpic();
        let effective = opts.effective(&ExclusionRule::defaults());
        assert_eq!(effective.get("shared"), Some(&OptionValue::Bool(false)));
        assert_eq!(effective.get("fPIC"), Some(&OptionValue::Bool(false)));
    }

    #[test]
    fn shared_removes_fpic() {
        let mut opts = shared_fpic();
        opts.set("shared", OptionValue::Bool(true)).unwrap();
        let effective = opts.effective(&ExclusionRule::defaults());
        assert_eq!(effective.get("shared"), Some(&OptionValue::Bool(true)));
        assert_eq!(effective.get("fPIC"), None);
    }

    #[test]
    fn fpic_override_survives_static_build() {
        let mut opts = shared_fpic();
        opts.set("fPIC", OptionValue::Bool(true)).unwrap();
        let effective = opts.effective(&ExclusionRule::defaults());
        assert_eq!(effective.get("fPIC"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn apply_rules_idempotent() {
        let rules = ExclusionRule::defaults();
        for shared in [true, false] {
            for fpic in [true, false] {
                let mut map = BTreeMap::new();
                map.insert("shared".to_string(), OptionValue::Bool(shared));
                map.insert("fPIC".to_string(), OptionValue::Bool(fpic));
                let once = apply_rules(map, &rules);
                let twice = apply_rules(once.clone(), &rules);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn rules_on_missing_trigger() {
        let mut map = BTreeMap::new();
        map.insert("fPIC".to_string(), OptionValue::Bool(false));
        let out = apply_rules(map.clone(), &ExclusionRule::defaults());
        assert_eq!(out, map);
    }

    #[test]
    fn duplicate_decl_rejected() {
        let err = OptionSet::from_decls(vec![
            OptionDecl::boolean("shared", false),
            OptionDecl::boolean("shared", true),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }
}
