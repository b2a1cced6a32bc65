pub mod tipi;
