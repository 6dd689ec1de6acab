pub mod opportunity_cost;
