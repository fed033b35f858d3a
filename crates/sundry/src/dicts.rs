//! Subset extraction for form-like maps
//!
//! Form data arrives as a heterogeneous `serde_json::Map`; these helpers
//! extract exactly the keys a handler cares about, fill in defaults, and
//! guard query filters against coming out empty.

use serde_json::{Map, Value};
use sundry_core::{Error, Result};

/// A JSON object, the value model of this module
pub type Form = Map<String, Value>;

/// Extract exactly the given keys from a form
///
/// A key missing from the form is an error; use [`Subdict`] to configure
/// defaults instead.
///
/// ```
/// use serde_json::json;
/// use sundry::dicts::subdict;
///
/// let form = json!({"user": "heinz", "password": "secret"});
/// let form = form.as_object().unwrap();
/// let sub = subdict(form, &["user"]).unwrap();
/// assert_eq!(sub.len(), 1);
/// assert_eq!(sub["user"], "heinz");
/// ```
pub fn subdict(form: &Form, keys: &[&str]) -> Result<Form> {
    Subdict::new(keys).extract(form)
}

/// Configurable subset extraction, the factory behind [`subdict`]
///
/// Holds a fixed configuration (keys, defaults, normalizers) and can be
/// applied to any number of forms.
pub struct Subdict {
    keys: Vec<String>,
    defaults: Form,
    default_with: Option<Box<dyn Fn(&str) -> Value>>,
    normalize: Vec<(String, Box<dyn Fn(Value) -> Value>)>,
    primary_fallback: Option<String>,
}

impl Subdict {
    pub fn new(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            defaults: Form::new(),
            default_with: None,
            normalize: Vec::new(),
            primary_fallback: None,
        }
    }

    /// A fixed default for one key
    #[must_use]
    pub fn default(mut self, key: &str, value: Value) -> Self {
        self.defaults.insert(key.to_string(), value);
        self
    }

    /// A factory producing defaults for all remaining missing keys
    #[must_use]
    pub fn default_with(mut self, factory: impl Fn(&str) -> Value + 'static) -> Self {
        self.default_with = Some(Box::new(factory));
        self
    }

    /// Normalize the extracted value of one key (e.g. trim a string)
    #[must_use]
    pub fn normalize(mut self, key: &str, func: impl Fn(Value) -> Value + 'static) -> Self {
        self.normalize.push((key.to_string(), Box::new(func)));
        self
    }

    /// An alternative form key consulted for the *first* configured key
    #[must_use]
    pub fn primary_fallback(mut self, key: &str) -> Self {
        self.primary_fallback = Some(key.to_string());
        self
    }

    /// Extract the configured keys, leaving the form untouched
    pub fn extract(&self, form: &Form) -> Result<Form> {
        let mut res = Form::new();
        for (i, key) in self.keys.iter().enumerate() {
            let raw = match form.get(key) {
                Some(val) => Some(val.clone()),
                None if i == 0 => self
                    .primary_fallback
                    .as_ref()
                    .and_then(|alias| form.get(alias))
                    .cloned(),
                None => None,
            };
            res.insert(key.clone(), self.resolve(key, raw)?);
        }
        Ok(res)
    }

    /// Like [`extract`](Self::extract), but remove the extracted keys
    /// from the source form
    pub fn extract_pop(&self, form: &mut Form) -> Result<Form> {
        let mut res = Form::new();
        for (i, key) in self.keys.iter().enumerate() {
            let mut raw = form.remove(key);
            if raw.is_none() && i == 0 {
                if let Some(alias) = &self.primary_fallback {
                    raw = form.remove(alias);
                }
            }
            res.insert(key.clone(), self.resolve(key, raw)?);
        }
        Ok(res)
    }

    fn resolve(&self, key: &str, raw: Option<Value>) -> Result<Value> {
        if let Some(val) = raw {
            for (nkey, func) in &self.normalize {
                if nkey == key {
                    return Ok(func(val));
                }
            }
            return Ok(val);
        }
        if let Some(val) = self.defaults.get(key) {
            return Ok(val.clone());
        }
        if let Some(factory) = &self.default_with {
            return Ok(factory(key));
        }
        Err(Error::key_not_found(key))
    }
}

/// Extract the first of several keys that holds a non-null value
///
/// With `strict`, a key missing from the form entirely is an error;
/// otherwise missing and null keys are skipped alike. If no key
/// qualifies, the result is empty.
///
/// ```
/// use serde_json::json;
/// use sundry::dicts::subdict_onekey;
///
/// let form = json!({"project_id": 42, "p2_result": null});
/// let form = form.as_object().unwrap();
/// let sub = subdict_onekey(form, &["p2_result", "project_id"], true).unwrap();
/// assert_eq!(sub["project_id"], 42);
/// ```
pub fn subdict_onekey(form: &Form, firstof: &[&str], strict: bool) -> Result<Form> {
    for key in firstof {
        match form.get(*key) {
            Some(Value::Null) => continue,
            Some(val) => {
                let mut res = Form::new();
                res.insert(key.to_string(), val.clone());
                return Ok(res);
            }
            None if strict => return Err(Error::key_not_found(*key)),
            None => continue,
        }
    }
    Ok(Form::new())
}

/// Extract keys for use as a query filter, dropping null values
///
/// An empty result is refused: a query built from it would match every
/// record of a table. Use [`subdict_forquery_relaxed`] if an empty
/// filter is acceptable.
pub fn subdict_forquery(form: &Form, keys: &[&str]) -> Result<Form> {
    let res = subdict_forquery_relaxed(form, keys)?;
    if res.is_empty() {
        let data = Value::Object(subdict(form, keys).unwrap_or_default()).to_string();
        return Err(Error::InsufficientQuery { data });
    }
    Ok(res)
}

/// Like [`subdict_forquery`], but an empty result is returned as-is
pub fn subdict_forquery_relaxed(form: &Form, keys: &[&str]) -> Result<Form> {
    let mut res = subdict(form, keys)?;
    res.retain(|_k, v| !v.is_null());
    Ok(res)
}

/// Coerce a string value to an integer where possible
///
/// For building query filters over columns that are numeric but arrive
/// as request strings: `"42"` becomes a number, anything else passes
/// through unchanged. The signature fits the
/// [`normalize`](Subdict::normalize) hook.
///
/// ```
/// use serde_json::json;
/// use sundry::dicts::int_or_other;
///
/// assert_eq!(int_or_other(json!(" 42 ")), json!(42));
/// assert_eq!(int_or_other(json!("x")), json!("x"));
/// assert_eq!(int_or_other(json!(null)), json!(null));
/// ```
pub fn int_or_other(val: Value) -> Value {
    match &val {
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => val,
        },
        _ => val,
    }
}

/// Return a copy of the map with the given entries applied
///
/// The source map stays untouched, roughly analogous to how `sorted`
/// relates to an in-place sort.
///
/// ```
/// use serde_json::json;
/// use sundry::dicts::updated;
///
/// let map = json!({"one": 1});
/// let map = map.as_object().unwrap();
/// let more = updated(map, [("two".to_string(), json!(2))]);
/// assert_eq!(map.len(), 1);
/// assert_eq!(more.len(), 2);
/// ```
pub fn updated(map: &Form, entries: impl IntoIterator<Item = (String, Value)>) -> Form {
    let mut res = map.clone();
    res.extend(entries);
    res
}
