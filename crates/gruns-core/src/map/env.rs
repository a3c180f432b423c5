use gruns_model::{Env, EnvSource};

use crate::{
    error::CoreError,
    resource::{EnvVarSource, SecretKeySelector, WireEnvVar},
};

/// Convert declared env vars into the container env list.
///
/// Fails on the first variable that sets both a literal value and a secret. Variables with
/// neither are dropped.
pub fn to_wire_env(env: &Env) -> Result<Vec<WireEnvVar>, CoreError> {
    let mut out = Vec::with_capacity(env.len());
    for var in env.iter() {
        let wire = match var.source()? {
            Some(EnvSource::Literal(value)) => WireEnvVar {
                name: var.name.clone(),
                value: Some(value.to_string()),
                value_source: None,
            },
            Some(EnvSource::Secret { secret, version }) => WireEnvVar {
                name: var.name.clone(),
                value: None,
                value_source: Some(EnvVarSource {
                    secret_key_ref: SecretKeySelector {
                        secret: secret.to_string(),
                        version: version.to_string(),
                    },
                }),
            },
            None => continue,
        };
        out.push(wire);
    }
    Ok(out)
}
