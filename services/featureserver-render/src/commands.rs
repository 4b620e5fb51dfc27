//! Subcommands and their execution.

use anyhow::{Context, Result};
use clap::Subcommand;

use featureserver_protocol::{LayerId, LayerQueryRequest, OutputFormat};
use fs_common::{Point, SpatialReference};
use projection::WebMercator;

use crate::state::AppState;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the registered data providers (HTML only)
    Providers,

    /// Server info of a provider
    Info,

    /// Service catalog of a provider
    Services,

    /// One feature service and its layers
    Service {
        /// Service id
        service: String,
    },

    /// One layer of a feature service
    Layer {
        service: String,
        layer: LayerId,
    },

    /// Query a layer (always JSON)
    Query {
        service: String,
        layer: LayerId,

        /// Return only the number of matching features
        #[arg(long)]
        count_only: bool,

        /// Return only the matching object ids
        #[arg(long)]
        ids_only: bool,

        /// Output spatial reference; 102100 reprojects to Web Mercator
        #[arg(long)]
        out_sr: Option<u32>,

        /// Extra provider query parameter, as key=value
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Project a WGS84 longitude/latitude to Web Mercator
    Project {
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Treat the inputs as Web Mercator x/y and convert back to WGS84
        #[arg(long)]
        inverse: bool,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

/// Run one command and return what should be printed.
pub async fn execute(
    state: &AppState,
    format: OutputFormat,
    provider_id: Option<&str>,
    command: Command,
) -> Result<String> {
    let renderer = &state.renderer;

    let rendered = match command {
        Command::Providers => {
            return Ok(renderer.data_providers_html(&state.registry));
        }
        Command::Project { lon, lat, inverse } => {
            let point = if inverse {
                let (lon, lat) = WebMercator::default().inverse(lon, lat);
                Point::new(lon, lat).with_spatial_reference(SpatialReference::wgs84())
            } else {
                projection::project(&Point::new(lon, lat))
            };
            return Ok(serde_json::to_string_pretty(&point)?);
        }
        Command::Info => renderer.info(format, state.provider(provider_id)?.as_ref())?,
        Command::Services => renderer.services(format, state.provider(provider_id)?.as_ref())?,
        Command::Service { service } => renderer
            .feature_service(format, state.provider(provider_id)?.as_ref(), &service)
            .with_context(|| format!("Failed to render service '{}'", service))?,
        Command::Layer { service, layer } => renderer
            .feature_service_layer(format, state.provider(provider_id)?.as_ref(), &service, layer)
            .with_context(|| format!("Failed to render layer {}/{}", service, layer))?,
        Command::Query {
            service,
            layer,
            count_only,
            ids_only,
            out_sr,
            params,
        } => {
            let mut pairs: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let out_sr_text = out_sr.map(|wkid| wkid.to_string());
            if let Some(wkid) = &out_sr_text {
                pairs.push(("outSR", wkid.as_str()));
            }

            let (_, mut request) = LayerQueryRequest::from_params(pairs)?;
            request.count_only |= count_only;
            request.ids_only |= ids_only;

            let result = renderer
                .feature_service_layer_query(
                    format,
                    state.provider(provider_id)?.as_ref(),
                    &service,
                    layer,
                    &request,
                )
                .await
                .with_context(|| format!("Query on {}/{} failed", service, layer))?;
            return Ok(result.to_json_string()?);
        }
    };

    rendered.into_body().context("Failed to encode output")
}
