pub mod id_codec;
