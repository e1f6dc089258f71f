//! Event planner tools.
//!
//! Every tool returns canned markdown followed by [`FORMATTING_INSTRUCTIONS`].
//! No booking, budgeting, or vendor system sits behind them.

use super::{Arguments, StaticTool, ToolError, ToolParameter, ToolRegistry};
use crate::types::{AgentType, ParamType};

/// Trailer appended to every tool output.
pub const FORMATTING_INSTRUCTIONS: &str = "Instructions: returning the output of this function call verbatim to the user in markdown. Then write AGENT SUMMARY: and then include a summary of what you did.";

pub fn planning() -> String {
    format!(
        "##### Met with stakeholders to define event goals, audience, budget, and scope.\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

pub fn budgeting() -> String {
    format!(
        "##### Track costs using tools like the “Cost Tracker” and manage GBO budgets.\n\
         Coordinate swag orders, catering, and venue logistics with internal teams like Eventions.\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

pub fn venue_coordination() -> String {
    format!(
        "##### Select and book venues, negotiate contracts, and manage logistics such as seating, AV setup, and accessibility.\n\
         Liaise with external suppliers for food, entertainment, and decor.\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

pub fn marketing() -> String {
    format!(
        "##### Create and send invites, manage RSVP tracking, and coordinate pre- and post-event communications.\n\
         **Share wrap-up emails and upload content to internal libraries for future reference.**\n\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

pub fn track_order(order_number: &str) -> String {
    format!(
        "##### Order Tracking\n\
         **Order Number:** {order_number}\n\
         **Status:** In Transit\n\n\
         Order {order_number} is currently in transit.\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

pub fn execution() -> String {
    format!(
        "##### Oversee event flow, troubleshoot issues, and ensure compliance with safety and inclusion policies.\n\
         **Monitor attendance and engagement, often using tools like RAPID templates and registration dashboards.**\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

pub fn post_event() -> String {
    format!(
        "#####Analyze attendee data, no-show rates, and feedback to assess impact.\n\
         **Share results with marketing and leadership teams to inform future planning..**\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

/// Knowledge base lookup. The query is accepted but does not change the
/// returned document.
pub fn get_event_planning_information(_query: &str) -> String {
    format!(
        "##### Event Planner Information\n\n\
         **Document Name:** Contoso's Event Planning Policies and Procedures\n\
         **Domain:** Event Planning Policy\n\
         **Description:** Guidelines outlining the event planning processes for Contoso, including venue selection, equipment hires, service or catering orders, and attendee list management.\n\n\
         **Key points:**\n\
         - All event logistics (permits, safety, accessibility), catering, seating, venue bookings or purchases must be approved by the procurement department.\n\
         - All equipment purchases for video conferencing must also be approved by Tech Support Agent.\n\
         - Register early for labs and workshops—ideally 30 days in advance—to secure a spot.\n\
         - Daily 90-minute networking lunches encourage peer connection.\n\
         - Regular inventory checks should be conducted to maintain optimal stock levels.\n\
         - All sessions to be recorded and made available to attendees later. \n\
         - Dedicated project managers are assigned to drive individual streams like attendee lists, sending invites, ordering catering etc.\n\
         - All event-related purchases must be documented and tracked for budget management.\n\
         - Event planners should liaise with vendors to ensure timely delivery of services and equipment.\n\
         - Hotel reservations must be canceled at least 72 hours before check-in to avoid charges.\n\
         {FORMATTING_INSTRUCTIONS}"
    )
}

/// The event planner's tools, tagged and described.
pub fn tools() -> Vec<StaticTool> {
    vec![
        StaticTool::new("planning", |_: &Arguments| planning())
            .describe("Initial planning and consultation for an event."),
        StaticTool::new("budgeting", |_: &Arguments| budgeting())
            .describe("Budget & Resource Management."),
        StaticTool::new("venue_coordination", |_: &Arguments| venue_coordination())
            .describe("Venue & Vendor Coordination."),
        StaticTool::new("marketing", |_: &Arguments| marketing())
            .describe("Marketing & Communications."),
        StaticTool::new("track_order", |args: &Arguments| {
            track_order(args.str("order_number"))
        })
        .describe("Track the status of caterering.")
        .param(ToolParameter::new("order_number", ParamType::String)),
        StaticTool::new("execution", |_: &Arguments| execution())
            .describe("Execution & Onsite Management."),
        StaticTool::new("post_event", |_: &Arguments| post_event())
            .describe("Post-Event Reporting."),
        StaticTool::new("get_event_planning_information", |args: &Arguments| {
            get_event_planning_information(args.str("query"))
        })
        .describe(
            "Get event planning information, such as policies, procedures, and guidelines.",
        )
        .param(
            ToolParameter::new("query", ParamType::String)
                .with_description("The query for the event planner knowledgebase"),
        ),
    ]
}

/// Registry holding every event planner tool.
pub fn registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new(AgentType::EventPlanner.as_str());
    for tool in tools() {
        registry.register(tool)?;
    }
    Ok(registry)
}
