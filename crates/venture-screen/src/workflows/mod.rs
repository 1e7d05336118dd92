pub mod viability;
