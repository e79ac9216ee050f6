/// egui widgets: the top bar and side panel, and the density plot.
pub mod panels;
pub mod plot;
