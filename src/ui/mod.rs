/// UI layer: selector panels, map scatter, record table and category chart.

pub mod chart;
pub mod map;
pub mod panels;
pub mod table;
