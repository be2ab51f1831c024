// utils/mod.rs
// 图像保存和多帧渲染流程
pub mod render_utils;
pub mod save_utils;
