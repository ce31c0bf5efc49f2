use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use render_loops::{
    render_for, render_if, Element, Fallback, ForProps, Frame, IfProps,
    Mapper, Node, RenderConfig, ShapePolicy, Value,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "render-loops", about = "Render declarative loops and conditionals to markup")]
struct Cli {
    /// Log render summaries at info level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one element per item of a JSON array (`of`) or object (`in`).
    Each {
        /// JSON document holding the source.
        source: PathBuf,
        /// Tag used for each item.
        #[arg(long, default_value = "li")]
        tag: String,
        /// Text rendered when the source is empty.
        #[arg(long)]
        if_empty: Option<String>,
        /// Reject length-bearing objects as array-likes.
        #[arg(long)]
        strict: bool,
    },
    /// Render a counting state loop.
    Range {
        /// Initial state.
        #[arg(long, default_value_t = 0.0)]
        start: f64,
        /// Loop while state is below this value.
        #[arg(long)]
        end: f64,
        /// Amount added on each step.
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        /// Tag used for each item.
        #[arg(long, default_value = "li")]
        tag: String,
    },
    /// Render a conditional chain.
    When {
        /// JSON value used as the test.
        #[arg(long)]
        test: String,
        /// Content when the test passes.
        #[arg(long)]
        then: String,
        /// Chained alternatives as `<json test>=<content>`, tried in order.
        #[arg(long = "else-if")]
        else_if: Vec<String>,
        /// Content when nothing else matched.
        #[arg(long = "else")]
        otherwise: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RenderConfig::default().with_verbose(cli.verbose);

    let node = match cli.command {
        Commands::Each {
            source,
            tag,
            if_empty,
            strict,
        } => {
            let policy = if strict {
                ShapePolicy::Strict
            } else {
                ShapePolicy::Permissive
            };
            run_each(&source, &tag, if_empty, config.with_shape_policy(policy))?
        }
        Commands::Range {
            start,
            end,
            step,
            tag,
        } => run_range(start, end, step, &tag, config)?,
        Commands::When {
            test,
            then,
            else_if,
            otherwise,
        } => run_when(&test, then, &else_if, otherwise)?,
    };

    println!("{}", node.to_markup());
    Ok(())
}

fn run_each(
    path: &Path,
    tag: &str,
    if_empty: Option<String>,
    config: RenderConfig,
) -> Result<Node> {
    let source = read_json(path)?;
    let mapping = is_mapping(&source, config.shape_policy);

    let mut props = ForProps::new()
        .as_(Mapper::with_frame(|item: &Value, frame: &Frame| item_element(tag, item, frame)))
        .config(config);
    props = if mapping {
        props.in_(source)
    } else {
        props.of(source)
    };
    if let Some(text) = if_empty {
        props = props.if_empty(Fallback::node(text));
    }

    render_for(props).with_context(|| format!("failed to render {}", path.display()))
}

/// Objects go to `in` unless the policy reads them as array-likes
fn is_mapping(source: &Value, policy: ShapePolicy) -> bool {
    matches!(source, Value::Object(_)) && !source.is_collection(policy)
}

fn run_range(start: f64, end: f64, step: f64, tag: &str, config: RenderConfig) -> Result<Node> {
    if step <= 0.0 || !step.is_finite() {
        bail!("step must be a positive number, got {}", step);
    }

    let props = ForProps::new()
        .initial(start)
        .condition(move |state| state.as_number().is_some_and(|n| n < end))
        .step(move |state| state.as_number().unwrap_or(end) + step)
        .key(|state| state.to_string())
        .as_(Mapper::with_frame(|item: &Value, frame: &Frame| item_element(tag, item, frame)))
        .config(config);

    render_for(props).context("failed to render range")
}

fn run_when(
    test: &str,
    then: String,
    else_if: &[String],
    otherwise: Option<String>,
) -> Result<Node> {
    let mut props = IfProps::new().test(parse_json(test)?).child(then);
    for alternative in else_if {
        let (test, content) = alternative
            .split_once('=')
            .with_context(|| format!("expected `<json test>=<content>`, got '{}'", alternative))?;
        props = props.child(Node::else_if(parse_json(test)?, vec![Node::text(content)]));
    }
    if let Some(content) = otherwise {
        props = props.child(Node::else_marker(vec![Node::text(content)]));
    }

    render_if(props).context("failed to render conditional")
}

fn item_element(tag: &str, item: &Value, frame: &Frame) -> Element {
    let mut element = Element::new(tag).attr("data-index", frame.index.to_string());
    if let Some(key) = &frame.key {
        element = element.attr("data-key", key.to_string());
    }
    if frame.is_first {
        element = element.attr("data-first", "true");
    }
    if frame.is_last {
        element = element.attr("data-last", "true");
    }
    element.child(item.to_string())
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_json(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn parse_json(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)
        .with_context(|| format!("'{}' is not valid JSON", text.trim()))?;
    Ok(Value::from(json))
}
