use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use pixela::types::{ApiResponse, GraphDefinition};
use serde::Serialize;

/// Prints the service's verdict and turns `isSuccess: false` into an error.
pub fn report(response: &ApiResponse) -> Result<()> {
    if response.is_success {
        println!("{}", response.message.green());
        Ok(())
    } else {
        Err(anyhow!("Pixela rejected the request: {}", response.message))
    }
}

/// Fails when a read shape carries the service's failure flag.
pub fn check(is_success: Option<bool>, message: Option<&str>) -> Result<()> {
    match is_success {
        Some(false) => Err(anyhow!(
            "Pixela rejected the request: {}",
            message.unwrap_or("no message")
        )),
        _ => Ok(()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).with_context(|| "Failed to format response")?;
    println!("{text}");
    Ok(())
}

pub fn format_graph(graph: &GraphDefinition) -> String {
    let swatch = match graph.color.as_str() {
        "shibafu" => "■".green(),
        "momiji" => "■".red(),
        "sora" => "■".blue(),
        "ichou" => "■".yellow(),
        "ajisai" => "■".purple(),
        "kuro" => "■".black(),
        _ => "■".normal(),
    };
    format!(
        "{} {:20} {} [{}, {}]",
        swatch, graph.id, graph.name, graph.unit, graph.graph_type
    )
}
