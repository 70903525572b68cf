pub mod eat10;
pub mod masticatory_score;
pub mod tongue_coating;
