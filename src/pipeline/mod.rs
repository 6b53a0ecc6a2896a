pub mod stage1_load;
pub mod stage2_rank;
pub mod stage3_lifetime;
pub mod stage4_heatmap;
pub mod stage5_color;
pub mod stage6_report;
