mod paraformer_client;

pub use paraformer_client::ParaformerClient;
