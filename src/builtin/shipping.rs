use serde_json::Value;
use crate::tools::{tool_fn, Tool};
use crate::types::{ToolArgs, ToolResult};
use super::text_arg;

/// Orders above this many containers need an explicit approval.
pub const LARGE_ORDER_THRESHOLD: u64 = 5;

/// Places a shipping order.
///
/// Small orders are approved automatically. Large orders come back `pending`
/// until the caller repeats the call with `approved` set, which either
/// approves or rejects them.
pub fn place_shipping_order(num_containers: u64, destination: &str, approved: Option<bool>) -> ToolResult {
    if num_containers <= LARGE_ORDER_THRESHOLD {
        return order("approved", num_containers, destination)
            .with("order_id", format!("ORD-{num_containers}-AUTO"))
            .with("message", format!("Order auto-approved: {num_containers} containers to {destination}"));
    }

    match approved {
        None => ToolResult::success()
            .with("order_status", "pending")
            .with("message", format!("Order for {num_containers} containers requires approval")),
        Some(true) => order("approved", num_containers, destination)
            .with("order_id", format!("ORD-{num_containers}-HUMAN"))
            .with("message", format!("Order approved: {num_containers} containers to {destination}")),
        Some(false) => ToolResult::success()
            .with("order_status", "rejected")
            .with("message", format!("Order rejected: {num_containers} containers to {destination}")),
    }
}

fn order(status: &str, num_containers: u64, destination: &str) -> ToolResult {
    ToolResult::success()
        .with("order_status", status)
        .with("num_containers", num_containers)
        .with("destination", destination)
}

fn containers_arg(args: &ToolArgs) -> Result<u64, String> {
    match args.get("num_containers") {
        Some(Value::Number(n)) => n.as_u64()
            .ok_or_else(|| format!("argument 'num_containers' must be a non-negative integer, got {n}")),
        Some(Value::String(s)) => s.trim().parse::<u64>()
            .map_err(|e| format!("argument 'num_containers' is not an integer: {e}")),
        Some(other) => Err(format!("argument 'num_containers' must be an integer, got {other}")),
        None => Err("missing argument 'num_containers'".to_string()),
    }
}

fn approved_arg(args: &ToolArgs) -> Result<Option<bool>, String> {
    match args.get("approved") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(format!("argument 'approved' must be a boolean, got {other}")),
    }
}

pub fn shipping_tool() -> Tool {
    Tool::new(
        "place_shipping_order",
        "Places a shipping order for a number of containers to a destination. \
         Orders above the approval threshold need an explicit 'approved' flag.",
        ["num_containers", "destination"],
        tool_fn(|args| {
            Ok(place_shipping_order(
                containers_arg(args)?,
                text_arg(args, "destination")?,
                approved_arg(args)?,
            ))
        }),
    )
    .optional(["approved"])
}
