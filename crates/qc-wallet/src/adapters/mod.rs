pub mod ds_backend;
