//! Output formatting for route, station and stop listings.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use railnav_lib::{format_distance, EndpointChoice, RouteSummary, Station, Stop};

use crate::terminal::ColorPalette;

/// Rendering style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write any serializable value as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Render a route summary as a tagged list of nodes.
pub fn write_route_text<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    writeln!(
        out,
        "Route: {}{}{} -> {}{}{} ({} hops, {}{}{})",
        p.white_bold,
        endpoint_label(summary.start.name.as_deref(), summary.start.node),
        p.reset,
        p.white_bold,
        endpoint_label(summary.goal.name.as_deref(), summary.goal.node),
        p.reset,
        summary.hops,
        p.green,
        format_distance(summary.distance_meters),
        p.reset,
    )?;

    let last = summary.steps.len().saturating_sub(1);
    for step in &summary.steps {
        let tag = if step.index == 0 {
            format!("{}STRT{} ", p.tag_start, p.reset)
        } else if step.index == last {
            format!("{}GOAL{} ", p.tag_goal, p.reset)
        } else {
            "     ".to_string()
        };
        let name = step
            .station
            .as_deref()
            .map(|name| format!(" {}{}{}", p.white_bold, name, p.reset))
            .unwrap_or_default();
        writeln!(
            out,
            "{}{}node {} ({:.5}, {:.5}){}{}",
            tag, p.gray, step.id, step.lat, step.lon, p.reset, name
        )?;
    }
    Ok(())
}

fn endpoint_label(name: Option<&str>, node: i64) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("node {}", node),
    }
}

/// List stations with the node they snapped to.
pub fn write_stations_text<W: Write>(out: &mut W, stations: &[Station]) -> io::Result<()> {
    for station in stations {
        let node = station
            .node
            .map(|node| node.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{} ({:.4},{:.4}) node {}",
            station.name, station.position.lat, station.position.lon, node
        )?;
    }
    Ok(())
}

/// List selectable endpoints with the reference to pass to `route`.
pub fn write_choices_text<W: Write>(out: &mut W, choices: &[EndpointChoice]) -> io::Result<()> {
    for choice in choices {
        writeln!(out, "{:<14} {}", choice.endpoint.to_string(), choice.label)?;
    }
    Ok(())
}

/// List stops with their positional reference.
pub fn write_stops_text<'a, W, I>(out: &mut W, stops: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Stop>,
{
    for (index, stop) in stops.into_iter().enumerate() {
        writeln!(
            out,
            "stop:{:<4} {} ({:.6}, {:.6})",
            index, stop.name, stop.lat, stop.lon
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railnav_lib::{Endpoint, GeoPoint, RouteEndpoint, RouteStep};

    fn summary() -> RouteSummary {
        RouteSummary {
            hops: 1,
            distance_meters: 1500.0,
            start: RouteEndpoint {
                reference: Endpoint::Node(1),
                node: 1,
                name: Some("Alpha".to_string()),
            },
            goal: RouteEndpoint {
                reference: Endpoint::Stop(0),
                node: 2,
                name: None,
            },
            steps: vec![
                RouteStep {
                    index: 0,
                    id: 1,
                    lat: 1.0,
                    lon: 2.0,
                    station: Some("Alpha".to_string()),
                },
                RouteStep {
                    index: 1,
                    id: 2,
                    lat: 1.5,
                    lon: 2.5,
                    station: None,
                },
            ],
        }
    }

    #[test]
    fn route_text_tags_start_and_goal() {
        let mut buffer = Vec::new();
        write_route_text(&mut buffer, &summary(), &ColorPalette::plain()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Route: Alpha -> node 2 (1 hops, 1.50 km)"), "{text}");
        assert!(text.contains("STRT node 1 (1.00000, 2.00000) Alpha"), "{text}");
        assert!(text.contains("GOAL node 2 (1.50000, 2.50000)"), "{text}");
    }

    #[test]
    fn stations_show_unsnapped_marker() {
        let stations = vec![Station {
            id: 7,
            name: "Nowhere".to_string(),
            position: GeoPoint::new(1.0, 2.0),
            node: None,
        }];
        let mut buffer = Vec::new();
        write_stations_text(&mut buffer, &stations).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Nowhere (1.0000,2.0000) node -\n"
        );
    }

    #[test]
    fn stops_are_listed_with_references() {
        let stops = [Stop::new("Home", 52.5, 13.4)];
        let mut buffer = Vec::new();
        write_stops_text(&mut buffer, &stops).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "stop:0    Home (52.500000, 13.400000)\n"
        );
    }

    #[test]
    fn json_output_is_pretty() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[1, 2]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[\n  1,\n  2\n]\n");
    }
}
